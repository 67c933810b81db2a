//! Environment-driven knobs for formatting and diagnostics.

pub(crate) const FMT_MAX_ROWS: &str = "STRATA_FMT_MAX_ROWS";
pub(crate) const FMT_STR_LEN: &str = "STRATA_FMT_STR_LEN";

pub fn verbose() -> bool {
    std::env::var("STRATA_VERBOSE").as_deref().unwrap_or("") == "1"
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

/// Maximum number of data rows a rendered table shows before truncating.
pub(crate) fn fmt_max_rows() -> usize {
    env_usize(FMT_MAX_ROWS, 25)
}

/// Maximum number of characters a rendered string cell shows.
pub(crate) fn fmt_str_len() -> usize {
    env_usize(FMT_STR_LEN, 30)
}
