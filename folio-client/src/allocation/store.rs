//! The allocation store.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use folio_core::error::{FieldError, Result};
use folio_core::types::{Asset, AssetId, BALANCE_TOLERANCE, Percentage, PortfolioId, round2};

use super::{AllocationBackend, AllocationUpdate, PortfolioRefresh, SaveOutcome};

/// How long the success pulse stays raised after a balanced save.
pub(crate) const PULSE_WINDOW: Duration = Duration::from_millis(2000);

/// Success-pulse state shared with the clearing timer task.
///
/// The generation counter makes timer effects monotonic: a timer only
/// clears the pulse if no newer pulse (or reset) has superseded it.
#[derive(Debug, Default)]
struct PulseState {
    active: AtomicBool,
    generation: AtomicU64,
}

impl PulseState {
    fn bump(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn reset(&self) {
        self.bump();
        self.active.store(false, Ordering::SeqCst);
    }
}

/// In-memory allocation mapping for one portfolio's detail view.
///
/// The store is single-owner: one view owns it for the lifetime of the
/// detail screen and serializes access through `&mut self`. It must be
/// re-initialized whenever the underlying asset list identity changes
/// (a server refetch), not merely re-rendered.
///
/// # Example
///
/// ```ignore
/// let mut store = AllocationStore::new(portfolio.id);
/// store.initialize(&portfolio.assets);
/// store.set(AssetId::new(1), "58.5");
/// if store.can_save() {
///     store.save(&assets_api, &portfolios_api).await?;
/// }
/// ```
pub struct AllocationStore {
    portfolio: PortfolioId,
    allocations: BTreeMap<AssetId, Percentage>,
    dirty: bool,
    in_flight: bool,
    epoch: u64,
    pulse: Arc<PulseState>,
    pulse_window: Duration,
}

impl AllocationStore {
    /// Creates an empty store for one portfolio.
    #[must_use]
    pub fn new(portfolio: PortfolioId) -> Self {
        Self {
            portfolio,
            allocations: BTreeMap::new(),
            dirty: false,
            in_flight: false,
            epoch: 0,
            pulse: Arc::new(PulseState::default()),
            pulse_window: PULSE_WINDOW,
        }
    }

    /// Returns the owning portfolio id.
    #[must_use]
    pub fn portfolio(&self) -> PortfolioId {
        self.portfolio
    }

    /// Seeds the mapping from the server's asset list.
    ///
    /// Reported percentages parse leniently and default to zero. When the
    /// portfolio holds exactly one asset and the resulting sum is not
    /// within tolerance of 100, that asset is forced to 100.00 — a
    /// load-time convenience only, never re-applied on edits. Resets the
    /// dirty flag and success pulse.
    pub fn initialize(&mut self, assets: &[Asset]) {
        self.epoch += 1;
        self.allocations.clear();
        for asset in assets {
            self.allocations.insert(asset.id, asset.reported_percentage());
        }

        if self.allocations.len() == 1 && !self.is_balanced() {
            if let Some(value) = self.allocations.values_mut().next() {
                debug!(portfolio = %self.portfolio, "Normalizing single asset to 100%");
                *value = Percentage::FULL;
            }
        }

        self.dirty = false;
        self.pulse.reset();
    }

    /// Initialization epoch, incremented on every [`initialize`].
    ///
    /// Callers that refetch asynchronously can capture this before the
    /// fetch and skip applying a completion that lost the race.
    ///
    /// [`initialize`]: AllocationStore::initialize
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Applies a user edit.
    ///
    /// Unparseable input is a silent no-op that retains the prior value
    /// (the caller may be mid-keystroke); the return value says whether
    /// the edit was applied. Parsed values are clamped to [0, 100] and
    /// rounded to two decimals. Unknown asset ids insert fresh entries —
    /// the mapping is open, not schema-checked against the asset list.
    pub fn set(&mut self, asset: AssetId, raw: &str) -> bool {
        let Some(value) = Percentage::parse_lenient(raw) else {
            debug!(asset = %asset, raw, "Ignoring unparseable allocation input");
            return false;
        };
        self.allocations.insert(asset, value);
        self.dirty = true;
        true
    }

    /// Returns the stored allocation for an asset.
    #[must_use]
    pub fn get(&self, asset: AssetId) -> Option<Percentage> {
        self.allocations.get(&asset).copied()
    }

    /// Iterates the current mapping in asset-id order.
    pub fn entries(&self) -> impl Iterator<Item = (AssetId, Percentage)> + '_ {
        self.allocations.iter().map(|(id, value)| (*id, *value))
    }

    /// Number of assets in the mapping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    /// Returns true if the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    /// Sum of all current allocations, rounded to two decimals.
    #[must_use]
    pub fn total(&self) -> Decimal {
        round2(self.allocations.values().map(Percentage::as_decimal).sum())
    }

    /// Returns true if the total is within tolerance of 100%.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        (self.total() - Decimal::ONE_HUNDRED).abs() <= BALANCE_TOLERANCE
    }

    /// Returns true if there are unsaved local changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns true if the success pulse is currently raised.
    #[must_use]
    pub fn pulse_active(&self) -> bool {
        self.pulse.active.load(Ordering::SeqCst)
    }

    /// Returns true if a save should be offered to the user: unsaved
    /// changes, a balanced total, and no save already in flight.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.dirty && self.is_balanced() && !self.in_flight
    }

    /// Serializes the full mapping for the bulk update call.
    #[must_use]
    pub fn updates(&self) -> Vec<AllocationUpdate> {
        self.allocations
            .iter()
            .map(|(id, value)| AllocationUpdate {
                asset_id: *id,
                allocation_percentage: value.as_decimal(),
            })
            .collect()
    }

    /// Saves the allocation set.
    ///
    /// Rejected locally — before any network traffic — when the total is
    /// out of tolerance or another save is in flight. See
    /// [`force_save`](AllocationStore::force_save) for the ungated path.
    pub async fn save(
        &mut self,
        backend: &dyn AllocationBackend,
        refresh: &dyn PortfolioRefresh,
    ) -> Result<SaveOutcome> {
        if self.in_flight {
            return Err(FieldError::SaveInFlight.into());
        }
        if !self.is_balanced() {
            return Err(FieldError::UnbalancedAllocations { total: self.total() }.into());
        }
        self.save_inner(backend, refresh).await
    }

    /// Saves without the balance gate (the in-flight guard still applies).
    ///
    /// Even if the server accepts an out-of-tolerance set, the success
    /// pulse is decided from the pre-save total and stays down.
    pub async fn force_save(
        &mut self,
        backend: &dyn AllocationBackend,
        refresh: &dyn PortfolioRefresh,
    ) -> Result<SaveOutcome> {
        if self.in_flight {
            return Err(FieldError::SaveInFlight.into());
        }
        self.save_inner(backend, refresh).await
    }

    async fn save_inner(
        &mut self,
        backend: &dyn AllocationBackend,
        refresh: &dyn PortfolioRefresh,
    ) -> Result<SaveOutcome> {
        // Captured before the request: edits racing the save must not
        // retroactively change the pulse decision for this save.
        let balanced = self.is_balanced();
        let updates = self.updates();

        self.in_flight = true;
        let result = backend.update_allocations(self.portfolio, &updates).await;
        self.in_flight = false;

        match result {
            Ok(()) => {
                self.dirty = false;
                if balanced {
                    self.raise_pulse();
                }
                refresh.refresh(self.portfolio).await?;
                Ok(SaveOutcome { balanced })
            }
            Err(e) => {
                // Dirty stays set so the user can retry without re-entering
                // anything; the mapping is untouched.
                warn!(portfolio = %self.portfolio, error = %e, "Allocation save failed");
                Err(e)
            }
        }
    }

    fn raise_pulse(&self) {
        let generation = self.pulse.bump();
        self.pulse.active.store(true, Ordering::SeqCst);

        let state = Arc::clone(&self.pulse);
        // Capture the deadline now, not at the task's first poll, so the
        // window starts when the pulse is raised.
        let sleep = tokio::time::sleep(self.pulse_window);
        tokio::spawn(async move {
            sleep.await;
            if state.generation.load(Ordering::SeqCst) == generation {
                state.active.store(false, Ordering::SeqCst);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use folio_core::error::{ApiError, FolioError};
    use folio_core::types::AssetType;
    use parking_lot::Mutex;
    use rust_decimal_macros::dec;

    fn asset(id: i64, allocation: Option<Decimal>) -> Asset {
        Asset {
            id: AssetId::new(id),
            asset_type: AssetType::Etf,
            name_or_ticker: format!("A{id}"),
            allocation_percentage: allocation,
            manual_expected_return: None,
        }
    }

    #[derive(Default)]
    struct MockBackend {
        calls: Mutex<Vec<Vec<AllocationUpdate>>>,
        fail: bool,
    }

    impl MockBackend {
        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().len()
        }
    }

    #[async_trait]
    impl AllocationBackend for MockBackend {
        async fn update_allocations(
            &self,
            _portfolio: PortfolioId,
            updates: &[AllocationUpdate],
        ) -> Result<()> {
            self.calls.lock().push(updates.to_vec());
            if self.fail {
                return Err(FolioError::Api(ApiError::Rejected {
                    status: 422,
                    message: "rejected by server".to_string(),
                }));
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockRefresh {
        count: Mutex<usize>,
    }

    impl MockRefresh {
        fn count(&self) -> usize {
            *self.count.lock()
        }
    }

    #[async_trait]
    impl PortfolioRefresh for MockRefresh {
        async fn refresh(&self, _id: PortfolioId) -> Result<()> {
            *self.count.lock() += 1;
            Ok(())
        }
    }

    fn store_with(assets: &[Asset]) -> AllocationStore {
        let mut store = AllocationStore::new(PortfolioId::new(1));
        store.initialize(assets);
        store
    }

    #[test]
    fn test_set_then_read_back_rounds() {
        let mut store = store_with(&[asset(1, Some(dec!(50))), asset(2, Some(dec!(50)))]);
        assert!(store.set(AssetId::new(1), "33.335"));
        assert_eq!(store.get(AssetId::new(1)).unwrap().as_decimal(), dec!(33.34));
    }

    #[test]
    fn test_set_clamps() {
        let mut store = store_with(&[asset(1, None)]);
        store.set(AssetId::new(1), "-5");
        assert_eq!(store.get(AssetId::new(1)).unwrap(), Percentage::ZERO);
        store.set(AssetId::new(1), "150");
        assert_eq!(store.get(AssetId::new(1)).unwrap(), Percentage::FULL);
    }

    #[test]
    fn test_set_unparseable_is_noop() {
        let mut store = store_with(&[asset(1, Some(dec!(40))), asset(2, Some(dec!(60)))]);
        assert!(!store.set(AssetId::new(1), "4o"));
        assert_eq!(store.get(AssetId::new(1)).unwrap().as_decimal(), dec!(40));
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_set_unknown_asset_inserts_fresh() {
        let mut store = store_with(&[asset(1, Some(dec!(100)))]);
        assert!(store.set(AssetId::new(99), "10"));
        assert_eq!(store.get(AssetId::new(99)).unwrap().as_decimal(), dec!(10));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_single_asset_normalized_on_initialize() {
        let store = store_with(&[asset(1, Some(dec!(37)))]);
        assert_eq!(store.total(), dec!(100));
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_single_asset_already_balanced_untouched() {
        let store = store_with(&[asset(1, Some(dec!(100)))]);
        assert_eq!(store.total(), dec!(100));
    }

    #[test]
    fn test_multi_asset_not_normalized() {
        let store = store_with(&[asset(1, Some(dec!(60))), asset(2, Some(dec!(40)))]);
        assert_eq!(store.total(), dec!(100));
        assert_eq!(store.get(AssetId::new(1)).unwrap().as_decimal(), dec!(60));
        assert_eq!(store.get(AssetId::new(2)).unwrap().as_decimal(), dec!(40));
    }

    #[test]
    fn test_multi_asset_unbalanced_kept_as_reported() {
        let store = store_with(&[asset(1, Some(dec!(60))), asset(2, Some(dec!(41.5)))]);
        assert_eq!(store.total(), dec!(101.5));
        assert!(!store.is_balanced());
    }

    #[test]
    fn test_junk_percentage_defaults_to_zero() {
        let store = store_with(&[asset(1, None), asset(2, Some(dec!(70)))]);
        assert_eq!(store.get(AssetId::new(1)).unwrap(), Percentage::ZERO);
        assert_eq!(store.total(), dec!(70));
    }

    #[test]
    fn test_normalization_does_not_retrigger_on_edit() {
        let mut store = store_with(&[asset(1, Some(dec!(100)))]);
        store.set(AssetId::new(1), "50");
        assert_eq!(store.total(), dec!(50));
        assert!(store.is_dirty());
    }

    #[test]
    fn test_reinitialize_resets_dirty_and_edits() {
        let assets = [asset(1, Some(dec!(60))), asset(2, Some(dec!(40)))];
        let mut store = store_with(&assets);
        store.set(AssetId::new(1), "10");
        assert!(store.is_dirty());

        store.initialize(&assets);
        assert!(!store.is_dirty());
        assert_eq!(store.get(AssetId::new(1)).unwrap().as_decimal(), dec!(60));
        assert_eq!(store.epoch(), 2);
    }

    #[test]
    fn test_balance_tolerance() {
        let mut store = store_with(&[asset(1, Some(dec!(60))), asset(2, Some(dec!(40)))]);
        store.set(AssetId::new(2), "40.01");
        assert!(store.is_balanced());
        store.set(AssetId::new(2), "40.02");
        assert!(!store.is_balanced());
    }

    #[test]
    fn test_can_save_requires_dirty_and_balanced() {
        let mut store = store_with(&[asset(1, Some(dec!(60))), asset(2, Some(dec!(40)))]);
        assert!(!store.can_save()); // clean
        store.set(AssetId::new(1), "59");
        assert!(!store.can_save()); // unbalanced
        store.set(AssetId::new(1), "60");
        assert!(store.can_save());
    }

    #[tokio::test]
    async fn test_unbalanced_save_blocked_before_network() {
        let mut store = store_with(&[asset(1, Some(dec!(60))), asset(2, Some(dec!(35)))]);
        store.set(AssetId::new(1), "60");
        let backend = MockBackend::default();
        let refresh = MockRefresh::default();

        let result = store.save(&backend, &refresh).await;
        assert!(matches!(
            result,
            Err(FolioError::Validation(
                FieldError::UnbalancedAllocations { .. }
            ))
        ));
        assert_eq!(backend.call_count(), 0);
        assert_eq!(refresh.count(), 0);
        assert!(store.is_dirty());
    }

    #[tokio::test]
    async fn test_forced_unbalanced_save_never_pulses() {
        let mut store = store_with(&[asset(1, Some(dec!(60))), asset(2, Some(dec!(35)))]);
        store.set(AssetId::new(1), "60");
        let backend = MockBackend::default();
        let refresh = MockRefresh::default();

        let outcome = store.force_save(&backend, &refresh).await.unwrap();
        assert!(!outcome.balanced);
        assert!(!store.pulse_active());
        assert!(!store.is_dirty()); // dirty clears unconditionally on success
        assert_eq!(backend.call_count(), 1);
        assert_eq!(refresh.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_to_end_save_flow() {
        // Assets load reporting 60 and 41.5: total 101.5, save blocked.
        let mut store = store_with(&[asset(1, Some(dec!(60))), asset(2, Some(dec!(41.5)))]);
        assert_eq!(store.total(), dec!(101.5));
        assert!(!store.can_save());

        // User edits asset 1 down to 58.5: total lands on 100.00.
        assert!(store.set(AssetId::new(1), "58.5"));
        assert_eq!(store.total(), dec!(100.00));
        assert!(store.can_save());

        let backend = MockBackend::default();
        let refresh = MockRefresh::default();
        let outcome = store.save(&backend, &refresh).await.unwrap();

        assert!(outcome.balanced);
        assert!(!store.is_dirty());
        assert!(store.pulse_active());
        assert_eq!(refresh.count(), 1);

        // The update carried the complete set.
        let calls = backend.calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            vec![
                AllocationUpdate {
                    asset_id: AssetId::new(1),
                    allocation_percentage: dec!(58.5),
                },
                AllocationUpdate {
                    asset_id: AssetId::new(2),
                    allocation_percentage: dec!(41.5),
                },
            ]
        );
        drop(calls);

        // Pulse reverts after the 2-second window.
        tokio::time::advance(Duration::from_millis(2001)).await;
        tokio::task::yield_now().await;
        assert!(!store.pulse_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_pulse_survives_older_timer() {
        let mut store = store_with(&[asset(1, Some(dec!(60))), asset(2, Some(dec!(40)))]);
        store.set(AssetId::new(1), "60");
        let backend = MockBackend::default();
        let refresh = MockRefresh::default();

        store.save(&backend, &refresh).await.unwrap();
        assert!(store.pulse_active());

        // A second balanced save one second later starts a fresh pulse.
        tokio::time::advance(Duration::from_millis(1000)).await;
        store.set(AssetId::new(1), "60");
        store.save(&backend, &refresh).await.unwrap();
        assert!(store.pulse_active());

        // The first save's timer fires now; it must not clear the newer pulse.
        tokio::time::advance(Duration::from_millis(1500)).await;
        tokio::task::yield_now().await;
        assert!(store.pulse_active());

        // The second save's own timer clears it.
        tokio::time::advance(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;
        assert!(!store.pulse_active());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_dirty_and_mapping() {
        let mut store = store_with(&[asset(1, Some(dec!(60))), asset(2, Some(dec!(40)))]);
        store.set(AssetId::new(1), "60");
        let backend = MockBackend::failing();
        let refresh = MockRefresh::default();

        let result = store.save(&backend, &refresh).await;
        let error = result.unwrap_err();
        assert_eq!(error.user_message(), "rejected by server");

        assert!(store.is_dirty());
        assert!(!store.pulse_active());
        assert_eq!(store.get(AssetId::new(1)).unwrap().as_decimal(), dec!(60));
        assert_eq!(refresh.count(), 0);
        // The store is retry-ready.
        assert!(store.can_save());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reinitialize_cancels_pulse() {
        let assets = [asset(1, Some(dec!(100)))];
        let mut store = store_with(&assets);
        store.set(AssetId::new(1), "100");
        let backend = MockBackend::default();
        let refresh = MockRefresh::default();

        store.save(&backend, &refresh).await.unwrap();
        assert!(store.pulse_active());

        store.initialize(&assets);
        assert!(!store.pulse_active());

        // The stale timer must not resurrect or clear anything unexpected.
        tokio::time::advance(Duration::from_millis(2001)).await;
        tokio::task::yield_now().await;
        assert!(!store.pulse_active());
    }
}
