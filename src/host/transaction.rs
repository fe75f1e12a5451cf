use crate::error::Result;
use crate::model::DocumentId;

use super::TransactionScope;

/// Scoped transaction on one document.
///
/// Begins on construction. Unless [`commit`](Self::commit) succeeds, the
/// transaction is rolled back when the guard is dropped, so an early `?`
/// return never leaves partial changes behind.
pub struct TransactionGuard<'a, H: TransactionScope + ?Sized> {
    host: &'a mut H,
    doc: DocumentId,
    open: bool,
}

impl<'a, H: TransactionScope + ?Sized> TransactionGuard<'a, H> {
    /// Opens a transaction called `name` on `doc`.
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses to begin the transaction.
    pub fn begin(host: &'a mut H, doc: DocumentId, name: &str) -> Result<Self> {
        host.begin(doc, name)?;
        tracing::debug!(name, "transaction started");
        Ok(Self {
            host,
            doc,
            open: true,
        })
    }

    /// The host, for mutations inside the transaction.
    pub fn host(&mut self) -> &mut H {
        &mut *self.host
    }

    /// Commits every change made through the guard.
    ///
    /// # Errors
    ///
    /// Returns an error if the host fails to commit; the transaction is then
    /// rolled back on drop.
    pub fn commit(mut self) -> Result<()> {
        self.host.commit(self.doc)?;
        self.open = false;
        tracing::debug!("transaction committed");
        Ok(())
    }
}

impl<H: TransactionScope + ?Sized> Drop for TransactionGuard<'_, H> {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        match self.host.rollback(self.doc) {
            Ok(()) => tracing::warn!("transaction rolled back"),
            Err(err) => tracing::error!(%err, "transaction rollback failed"),
        }
    }
}
