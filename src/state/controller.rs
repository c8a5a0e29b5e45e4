use tracing::{debug, info, warn};

use crate::error::{NutriError, Result};
use crate::models::{MealSlot, Plan, SavedPlan, UserProfile};
use crate::service::PlanService;
use crate::state::PlanStore;

/// State captured right before a regeneration request.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoSnapshot {
    pub plan: Plan,
    pub selections: Vec<usize>,
    pub locks: Vec<bool>,
}

/// Owns the plan shown to the user, per-slot selections and locks, and the
/// single undo snapshot.
///
/// One controller lives for one session; [`PlanStateController::reset`]
/// returns it to the "no plan" state.
pub struct PlanStateController<S> {
    service: S,
    store: PlanStore,
    /// Profile the current plan was requested with; regeneration reuses it.
    profile: Option<UserProfile>,
    plan: Option<Plan>,
    selections: Vec<usize>,
    locks: Vec<bool>,
    snapshot: Option<UndoSnapshot>,
}

impl<S: PlanService> PlanStateController<S> {
    pub fn new(service: S, store: PlanStore) -> Self {
        Self {
            service,
            store,
            profile: None,
            plan: None,
            selections: Vec::new(),
            locks: Vec::new(),
            snapshot: None,
        }
    }

    /// Drop the plan, selections, locks and snapshot.
    pub fn reset(&mut self) {
        self.profile = None;
        self.clear_plan();
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn store(&self) -> &PlanStore {
        &self.store
    }

    pub fn selections(&self) -> &[usize] {
        &self.selections
    }

    pub fn locks(&self) -> &[bool] {
        &self.locks
    }

    pub fn snapshot(&self) -> Option<&UndoSnapshot> {
        self.snapshot.as_ref()
    }

    /// Selected option index for `slot`, 0 when unknown.
    pub fn selected_index(&self, slot: usize) -> usize {
        match self.plan.as_ref().and_then(|p| p.slots.get(slot)) {
            Some(meal) => meal.resolve_index(self.selections.get(slot).copied().unwrap_or(0)),
            None => 0,
        }
    }

    pub fn is_locked(&self, slot: usize) -> bool {
        self.locks.get(slot).copied().unwrap_or(false)
    }

    pub fn undo_available(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Total calories of the current selection, recomputed on every call.
    pub fn total_calories(&self) -> Option<f64> {
        self.plan.as_ref().map(|p| p.total_calories(&self.selections))
    }

    /// Request a fresh plan for `profile`.
    ///
    /// Any failure leaves no plan behind.
    pub fn generate(&mut self, profile: UserProfile) -> Result<&Plan> {
        profile.validate()?;

        self.clear_plan();
        let result = self.service.generate_plan(&profile, None);
        self.profile = Some(profile);

        let plan = result.inspect_err(|e| warn!(error = %e, "plan generation failed"))?;
        let slots = plan.slots.len();
        self.selections = vec![0; slots];
        self.locks = vec![false; slots];
        info!(slots, "plan generated");
        Ok(&*self.plan.insert(plan))
    }

    /// Choose option `option` in slot `slot`; returns the new total.
    pub fn select(&mut self, slot: usize, option: usize) -> Result<f64> {
        let plan = self.plan.as_ref().ok_or(NutriError::NoPlan)?;
        let meal = plan
            .slots
            .get(slot)
            .ok_or_else(|| NutriError::InvalidInput(format!("no meal slot {}", slot + 1)))?;
        if option >= meal.options().len() {
            return Err(NutriError::InvalidInput(format!(
                "{} has {} option(s)",
                meal.name,
                meal.options().len()
            )));
        }

        self.selections[slot] = option;
        debug!(slot, option, "selection changed");
        Ok(plan.total_calories(&self.selections))
    }

    /// Flip the lock on `slot`; returns the new flag.
    pub fn toggle_lock(&mut self, slot: usize) -> Result<bool> {
        let plan = self.plan.as_ref().ok_or(NutriError::NoPlan)?;
        if slot >= plan.slots.len() {
            return Err(NutriError::InvalidInput(format!("no meal slot {}", slot + 1)));
        }
        let lock = &mut self.locks[slot];
        *lock = !*lock;
        debug!(slot, locked = *lock, "lock toggled");
        Ok(*lock)
    }

    /// Fetch new alternatives, keeping the selected option of locked slots.
    ///
    /// The snapshot is taken before the request and survives a failed call,
    /// which leaves the current plan untouched. Requests are sequential:
    /// the `&mut self` receiver rules out a second call in flight.
    pub fn regenerate(&mut self) -> Result<&Plan> {
        let (Some(profile), Some(current)) = (self.profile.as_ref(), self.plan.as_ref()) else {
            return Err(NutriError::NoPlan);
        };

        self.snapshot = Some(UndoSnapshot {
            plan: current.clone(),
            selections: self.selections.clone(),
            locks: self.locks.clone(),
        });

        let nonce: u64 = rand::random();
        let result = self.service.generate_plan(profile, Some(nonce));

        let fresh = result.inspect_err(|e| warn!(error = %e, "regeneration failed"))?;
        let Some(snapshot) = self.snapshot.as_ref() else {
            return Err(NutriError::NoPlan);
        };
        let (plan, locks) = merge_locked(&snapshot.plan, &snapshot.selections, &snapshot.locks, fresh);

        self.selections = vec![0; plan.slots.len()];
        self.locks = locks;
        info!(
            slots = plan.slots.len(),
            locked = self.locks.iter().filter(|l| **l).count(),
            "plan regenerated"
        );
        Ok(&*self.plan.insert(plan))
    }

    /// Restore the state from before the last regeneration.
    ///
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.snapshot.take() else {
            return false;
        };

        let UndoSnapshot {
            plan,
            selections,
            locks,
        } = snapshot;
        self.selections = plan
            .slots
            .iter()
            .enumerate()
            .map(|(i, slot)| slot.resolve_index(selections.get(i).copied().unwrap_or(0)))
            .collect();
        self.locks = (0..plan.slots.len())
            .map(|i| locks.get(i).copied().unwrap_or(false))
            .collect();
        self.plan = Some(plan);
        info!("restored previous plan");
        true
    }

    /// Persist the current selection, replacing any earlier save.
    pub fn save(&self) -> Result<SavedPlan> {
        let (Some(profile), Some(plan)) = (self.profile.as_ref(), self.plan.as_ref()) else {
            return Err(NutriError::NoPlan);
        };
        let saved = SavedPlan::new(profile.clone(), plan.resolve(&self.selections));
        self.store.save(&saved)?;
        info!(signature = %saved.signature, "plan saved");
        Ok(saved)
    }

    /// Load the saved plan if it was made for `current`.
    pub fn load(&self, current: &UserProfile) -> Result<SavedPlan> {
        self.store.load_for(current)
    }

    fn clear_plan(&mut self) {
        self.plan = None;
        self.selections.clear();
        self.locks.clear();
        self.snapshot = None;
    }
}

/// Combine a fresh plan with the locked slots of the previous one.
///
/// A locked slot becomes a singleton holding the option that was selected;
/// unlocked slots take the fresh alternatives. Locks carry over for slots that
/// still exist. Returns the merged plan and its lock flags.
pub fn merge_locked(
    previous: &Plan,
    selections: &[usize],
    locks: &[bool],
    fresh: Plan,
) -> (Plan, Vec<bool>) {
    let mut merged_locks = Vec::with_capacity(fresh.slots.len());
    let slots = fresh
        .slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            let locked = locks.get(i).copied().unwrap_or(false);
            match previous.slots.get(i) {
                Some(prev) if locked => {
                    merged_locks.push(true);
                    let chosen = prev.option_at(selections.get(i).copied().unwrap_or(0));
                    MealSlot::singleton(prev.name.clone(), chosen.clone())
                }
                _ => {
                    merged_locks.push(false);
                    slot
                }
            }
        })
        .collect();

    (
        Plan {
            tdee: fresh.tdee,
            macros: fresh.macros,
            slots,
        },
        merged_locks,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Macros, MealOption};

    fn option(item: &str, calories: f64) -> MealOption {
        MealOption {
            items: vec![item.to_string()],
            calories,
        }
    }

    fn plan(slots: Vec<MealSlot>) -> Plan {
        Plan {
            tdee: 2000.0,
            macros: Macros::default(),
            slots,
        }
    }

    #[test]
    fn test_merge_keeps_locked_selection_verbatim() {
        let previous = plan(vec![
            MealSlot::new("Breakfast", vec![option("Oats", 154.0), option("Idli", 270.0)]).unwrap(),
            MealSlot::new("Lunch", vec![option("Rice", 206.0)]).unwrap(),
        ]);
        let fresh = plan(vec![
            MealSlot::new("Breakfast", vec![option("Dosa", 240.0)]).unwrap(),
            MealSlot::new("Lunch", vec![option("Dal", 230.0), option("Rajma", 240.0)]).unwrap(),
        ]);

        let (merged, locks) = merge_locked(&previous, &[1, 0], &[true, false], fresh);

        assert_eq!(merged.slots[0].options(), &[option("Idli", 270.0)]);
        assert_eq!(merged.slots[1].options().len(), 2);
        assert_eq!(locks, vec![true, false]);
    }

    #[test]
    fn test_merge_drops_locks_for_missing_slots() {
        let previous = plan(vec![MealSlot::new("Breakfast", vec![option("Oats", 154.0)]).unwrap()]);
        let fresh = plan(vec![
            MealSlot::new("Breakfast", vec![option("Dosa", 240.0)]).unwrap(),
            MealSlot::new("Snack", vec![option("Apple", 95.0)]).unwrap(),
        ]);

        let (merged, locks) = merge_locked(&previous, &[], &[false, true], fresh);
        assert_eq!(merged.slots[1].name, "Snack");
        assert_eq!(locks, vec![false, false]);
    }
}
