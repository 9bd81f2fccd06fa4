/// Landing page describing the history endpoints.
pub async fn index() -> &'static str {
    "Historical market indicators for SRG20 tokens, by token address.\n\
     \n\
     * Price history (hourly):      GET /price-history/:tokenAddress\n\
     * Volume history (daily):      GET /volume-history/:tokenAddress\n\
     * Liquidity history (daily):   GET /liquidity-history/:tokenAddress\n\
     \n\
     Each endpoint accepts ?interval=hour|day to change the window size.\n"
}
