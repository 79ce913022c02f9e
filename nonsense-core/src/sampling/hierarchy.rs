use rand::Rng;

/// Identifier handed out by the content repository.
pub type EntityId = u64;

/// Parent id of top-level units.
pub const ROOT: EntityId = 0;

/// Outcome of one hierarchy step.
///
/// Exactly one outcome is produced per generated unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
	/// The unit becomes a child of the previously created unit.
	BecomeChild,
	/// The unit goes back to the top level.
	ResetToRoot,
	/// The unit keeps the parent and depth of the previous unit.
	Hold,
}

/// Parent and depth tracker for one run of one kind of content.
///
/// # Invariants
/// - `current_depth >= 1`
/// - `parent_id == ROOT` whenever `current_depth == 1` after a reset
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HierarchyState {
	/// Last created unit, candidate parent for the next one.
	pub previous_id: EntityId,
	/// Depth of the next unit, 1 for top-level units.
	pub current_depth: u32,
	/// Parent of the next unit.
	pub parent_id: EntityId,
}

impl Default for HierarchyState {
	fn default() -> Self {
		Self { previous_id: ROOT, current_depth: 1, parent_id: ROOT }
	}
}

impl HierarchyState {
	/// Fresh state at the top level.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records the unit that was just created.
	pub fn record(&mut self, id: EntityId) {
		self.previous_id = id;
	}

	/// Applies a decision.
	pub fn apply(&mut self, decision: Decision) {
		match decision {
			Decision::BecomeChild => {
				self.parent_id = self.previous_id;
				self.current_depth += 1;
			}
			Decision::ResetToRoot => {
				self.parent_id = ROOT;
				self.current_depth = 1;
			}
			Decision::Hold => (),
		}
	}
}

/// Random parent/child decisions.
///
/// Stateless: all state lives in the caller's `HierarchyState`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HierarchySampler;

impl HierarchySampler {
	/// One chance in two.
	pub fn should_become_child<R: Rng>(rng: &mut R) -> bool {
		rng.random_range(1..=2) == 1
	}

	/// One chance in three.
	pub fn should_reset_to_root<R: Rng>(rng: &mut R) -> bool {
		rng.random_range(1..=3) == 3
	}

	/// Decides what happens to the next unit.
	///
	/// The child draw always comes first. When it fails, or when the
	/// depth limit is reached, the reset draw decides between
	/// `ResetToRoot` and `Hold`.
	pub fn decide<R: Rng>(rng: &mut R, state: &HierarchyState, max_depth: u32) -> Decision {
		if Self::should_become_child(rng) && state.current_depth < max_depth {
			Decision::BecomeChild
		} else if Self::should_reset_to_root(rng) {
			Decision::ResetToRoot
		} else {
			Decision::Hold
		}
	}

	/// Returns the state for the next unit.
	pub fn advance<R: Rng>(rng: &mut R, mut state: HierarchyState, max_depth: u32) -> HierarchyState {
		let decision = Self::decide(rng, &state, max_depth);
		state.apply(decision);
		state
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn depth_one_never_nests() {
		let mut rng = StdRng::seed_from_u64(42);
		let mut state = HierarchyState::new();
		for id in 1..=5_000 {
			state = HierarchySampler::advance(&mut rng, state, 1);
			assert_eq!(state.parent_id, ROOT);
			assert_eq!(state.current_depth, 1);
			state.record(id);
		}
	}

	#[test]
	fn depth_never_exceeds_limit() {
		let mut rng = StdRng::seed_from_u64(7);
		let mut state = HierarchyState::new();
		let mut deepest = 1;
		for id in 1..=5_000 {
			state = HierarchySampler::advance(&mut rng, state, 4);
			assert!(state.current_depth <= 4);
			deepest = deepest.max(state.current_depth);
			state.record(id);
		}
		assert_eq!(deepest, 4);
	}

	#[test]
	fn child_takes_previous_unit_as_parent() {
		let mut state = HierarchyState::new();
		state.record(17);
		state.apply(Decision::BecomeChild);
		assert_eq!(state.parent_id, 17);
		assert_eq!(state.current_depth, 2);

		state.record(18);
		state.apply(Decision::Hold);
		assert_eq!(state.parent_id, 17);
		assert_eq!(state.current_depth, 2);

		state.apply(Decision::ResetToRoot);
		assert_eq!(state, HierarchyState { previous_id: 18, current_depth: 1, parent_id: ROOT });
	}

	#[test]
	fn decisions_follow_the_expected_frequencies() {
		let mut rng = StdRng::seed_from_u64(1234);
		let state = HierarchyState::new();
		let draws = 30_000;
		let mut counts = [0usize; 3];
		for _ in 0..draws {
			match HierarchySampler::decide(&mut rng, &state, u32::MAX) {
				Decision::BecomeChild => counts[0] += 1,
				Decision::ResetToRoot => counts[1] += 1,
				Decision::Hold => counts[2] += 1,
			}
		}
		// 1/2 child, 1/2 * 1/3 reset, 1/2 * 2/3 hold
		let ratio = |count: usize| count as f64 / draws as f64;
		assert!((ratio(counts[0]) - 0.5).abs() < 0.02);
		assert!((ratio(counts[1]) - 1.0 / 6.0).abs() < 0.02);
		assert!((ratio(counts[2]) - 1.0 / 3.0).abs() < 0.02);
	}

	#[test]
	fn depth_limit_turns_child_into_reset_or_hold() {
		let mut rng = StdRng::seed_from_u64(99);
		let state = HierarchyState { previous_id: 3, current_depth: 2, parent_id: 1 };
		for _ in 0..1_000 {
			assert_ne!(HierarchySampler::decide(&mut rng, &state, 2), Decision::BecomeChild);
		}
	}
}
