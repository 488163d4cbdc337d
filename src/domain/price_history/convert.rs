use super::wire::HistoryEntryWire;
use super::HistoryEntry;
use crate::shared::serde_util::parse_timestamp;
use crate::shared::Price;

/// Why a wire row could not become a [`HistoryEntry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
    #[error("unparseable timestamp {0:?}")]
    Timestamp(String),
    #[error("zero price")]
    ZeroPrice,
}

impl TryFrom<HistoryEntryWire> for HistoryEntry {
    type Error = EntryError;

    fn try_from(w: HistoryEntryWire) -> Result<Self, Self::Error> {
        let timestamp = parse_timestamp(&w.timestamp).ok_or(EntryError::Timestamp(w.timestamp))?;
        let price = Price::new(w.price).ok_or(EntryError::ZeroPrice)?;
        Ok(Self { timestamp, price })
    }
}

/// Convert every usable row, logging and dropping the rest.
pub(crate) fn entries_from_wire(rows: Vec<HistoryEntryWire>) -> Vec<HistoryEntry> {
    rows.into_iter()
        .filter_map(|row| match HistoryEntry::try_from(row) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping history row: {}", e);
                None
            }
        })
        .collect()
}
