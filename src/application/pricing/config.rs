pub const COINGECKO_PRICE_API: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin,ethereum,solana&vs_currencies=usd";
pub const PRICE_PLACEHOLDER: &str = "N/A";
