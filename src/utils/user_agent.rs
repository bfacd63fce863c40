/// Tool identifier written into trace metadata
pub fn user_agent() -> String {
    format!(
        "search-bench {}({})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    )
}
