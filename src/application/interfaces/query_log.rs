/// Fire-and-forget record of raw query text.
///
/// `record` must return immediately: the retrieval path never awaits the
/// log and never observes its failures. Implementations surface delivery
/// problems through local diagnostics only.
pub trait QueryLog: Send + Sync {
    fn record(&self, query: &str);
}
