// ============================================================================
// Economy State
// The mutable model and its persisted form
// ============================================================================

use super::item::{Catalog, ItemId};
use crate::numeric::Currency;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Everything a running economy owns and mutates.
///
/// Owned counts are indexed by catalog position; a missing slot means zero.
/// The balance never goes below zero: debits that would overdraw are refused.
#[derive(Debug, Clone, PartialEq)]
pub struct EconomyState {
    owned: SmallVec<[u64; 16]>,
    balance: Currency,
    last_update: Option<DateTime<Utc>>,
}

impl EconomyState {
    /// Nothing owned, zero balance
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            owned: SmallVec::new(),
            balance: Currency::zero(),
            last_update: Some(now),
        }
    }

    // ========================================================================
    // Getters
    // ========================================================================

    pub fn owned(&self, id: ItemId) -> u64 {
        self.owned.get(id.index()).copied().unwrap_or(0)
    }

    /// Non-zero counts only
    pub fn owned_iter(&self) -> impl Iterator<Item = (ItemId, u64)> + '_ {
        self.owned
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .map(|(index, count)| (ItemId(index), count))
    }

    pub fn balance(&self) -> &Currency {
        &self.balance
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    pub(crate) fn add_owned(&mut self, id: ItemId, n: u64) {
        let index = id.index();
        if self.owned.len() <= index {
            self.owned.resize(index + 1, 0);
        }
        self.owned[index] = self.owned[index].saturating_add(n);
    }

    pub(crate) fn credit(&mut self, amount: &Currency) {
        self.balance = &self.balance + amount;
    }

    /// Returns false and leaves the balance alone if it would go negative
    pub(crate) fn debit(&mut self, amount: &Currency) -> bool {
        if &self.balance < amount {
            return false;
        }
        self.balance = &self.balance - amount;
        true
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.last_update = Some(now);
    }

    // ========================================================================
    // Persistence Mapping
    // ========================================================================

    /// Convert to the name-keyed wire form
    pub fn to_saved(&self, catalog: &Catalog) -> SavedState {
        let owned = catalog
            .iter()
            .map(|(id, item)| (item.name.clone(), self.owned(id)))
            .filter(|(_, count)| *count > 0)
            .collect();

        SavedState {
            balance: self.balance.clone(),
            owned,
            last_update_ms: self.last_update.map(|t| t.timestamp_millis()),
        }
    }

    /// Rebuild from the wire form.
    ///
    /// Names not in the catalog are dropped and a negative balance is clamped
    /// to zero; both are logged.
    pub fn from_saved(saved: SavedState, catalog: &Catalog) -> Self {
        let mut state = Self {
            owned: SmallVec::new(),
            balance: Currency::zero(),
            last_update: saved
                .last_update_ms
                .and_then(DateTime::<Utc>::from_timestamp_millis),
        };

        for (name, count) in saved.owned {
            match catalog.find(&name) {
                Some(id) => state.add_owned(id, count),
                None => tracing::warn!("Dropping unknown item from saved state: {}", name),
            }
        }

        if saved.balance.is_negative() {
            tracing::warn!(
                "Saved balance {} is negative, starting from zero",
                saved.balance
            );
        } else {
            state.balance = saved.balance;
        }

        state
    }
}

/// Wire form handed to the persistence collaborator.
///
/// The balance travels as a full-precision decimal string, the rest as plain
/// integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    pub balance: Currency,

    #[serde(default)]
    pub owned: BTreeMap<String, u64>,

    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub last_update_ms: Option<i64>,
}

impl SavedState {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_fresh_state() {
        let catalog = Catalog::standard();
        let state = EconomyState::fresh(t0());

        assert!(state.balance().is_zero());
        assert_eq!(state.last_update(), Some(t0()));
        for (id, _) in catalog.iter() {
            assert_eq!(state.owned(id), 0);
        }
    }

    #[test]
    fn test_add_owned_grows_storage() {
        let catalog = Catalog::standard();
        let bow = catalog.find("bow").unwrap();
        let mut state = EconomyState::fresh(t0());

        state.add_owned(bow, 2);
        state.add_owned(bow, 3);

        assert_eq!(state.owned(bow), 5);
        assert_eq!(state.owned(catalog.find("sword").unwrap()), 0);
        assert_eq!(state.owned_iter().collect::<Vec<_>>(), vec![(bow, 5)]);
    }

    #[test]
    fn test_debit_refuses_overdraft() {
        let mut state = EconomyState::fresh(t0());
        state.credit(&Currency::from_integer(5));

        assert!(!state.debit(&Currency::from_integer(6)));
        assert_eq!(state.balance(), &Currency::from_integer(5));

        assert!(state.debit(&Currency::from_integer(5)));
        assert!(state.balance().is_zero());
    }

    #[test]
    fn test_saved_round_trip() {
        let catalog = Catalog::standard();
        let mut state = EconomyState::fresh(t0());
        state.add_owned(catalog.find("shield").unwrap(), 4);
        state.credit(&"123456789012345678901234.5678".parse().unwrap());

        let json = state.to_saved(&catalog).to_json().unwrap();
        assert!(json.contains("\"123456789012345678901234.5678000000000000\""));
        assert!(json.contains("\"shield\":4"));

        let back = EconomyState::from_saved(SavedState::from_json(&json).unwrap(), &catalog);
        assert_eq!(back, state);
    }

    #[test]
    fn test_from_saved_tolerates_bad_data() {
        let catalog = Catalog::standard();
        let saved = SavedState::from_json(
            r#"{"balance": "-3", "owned": {"sword": 2, "spoon": 9}}"#,
        )
        .unwrap();

        let state = EconomyState::from_saved(saved, &catalog);
        assert!(state.balance().is_zero());
        assert_eq!(state.owned(catalog.find("sword").unwrap()), 2);
        assert_eq!(state.owned_iter().count(), 1);
        assert_eq!(state.last_update(), None);
    }
}
