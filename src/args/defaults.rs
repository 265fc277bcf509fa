/// Streamable-HTTP endpoint of a locally running tool server.
pub const DEFAULT_URL: &str = "http://127.0.0.1:3000/mcp";
pub const DEFAULT_TOOL: &str = "get_option_data";
/// Tool argument that receives each request identifier.
pub const DEFAULT_ID_FIELD: &str = "ticker";
pub(crate) const DEFAULT_ARGUMENT: &str = "option_type=call";
pub(crate) const DEFAULT_SINGLE_ID: &str = "AAPL";
pub(crate) const DEFAULT_TIMEOUT: &str = "30s";

/// Thirty large-cap tickers, enough to overrun a small server queue.
pub const DEFAULT_TICKERS: [&str; 30] = [
    "AAPL", "MSFT", "GOOG", "AMZN", "TSLA", "META", "NVDA", "AMD", "INTC", "NFLX", "JPM", "BAC",
    "WFC", "GS", "MS", "C", "V", "MA", "AXP", "PYPL", "DIS", "CMCSA", "T", "VZ", "TMUS", "KO",
    "PEP", "MCD", "SBUX", "WMT",
];
