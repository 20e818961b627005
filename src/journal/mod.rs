mod actor;
mod api;
mod array_journal;
mod iterator;
mod spy;

pub use api::CommitNotifier;
pub use api::CommitStreamSender;
pub use api::Entry;
pub use api::Journal;
pub use api::JournalError;
pub use api::UncommittedEntriesReport;
pub use array_journal::ArrayJournal;
pub use iterator::JournalIterator;
pub use spy::JournalSpy;
