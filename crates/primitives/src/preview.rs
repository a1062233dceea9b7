/// Number of transaction hashes shown on the overview page.
pub const DEFAULT_PREVIEW_LIMIT: usize = 5;

/// Take the first `limit` items of a transaction list for display.
///
/// Returns the truncated list and the overflow count (`max(0, len - limit)`),
/// which the caller renders as a `+N more...` suffix.
pub fn transactions_preview<T: Clone>(transactions: &[T], limit: usize) -> (Vec<T>, usize) {
    let shown = transactions.iter().take(limit).cloned().collect();
    let overflow = transactions.len().saturating_sub(limit);
    (shown, overflow)
}
