//! Cluster sizing parameters derived from the requested teachers per group.

/// Size target and hard cap for teacher clusters.
///
/// All three values are derived once per run from the teacher population and
/// the caller's `teachers_per_group` request, using integer arithmetic only.
///
/// # Examples
/// ```
/// use cohort_core::GroupSizing;
///
/// let sizing = GroupSizing::new(10, 3);
/// assert_eq!(sizing.target(), 3);
/// assert_eq!(sizing.target_group_count(), 3);
/// assert_eq!(sizing.hard_max(), 5);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GroupSizing {
    target: usize,
    target_group_count: usize,
    hard_max: usize,
}

impl GroupSizing {
    /// Smallest cluster size the grouping aims for.
    pub const MIN_TARGET: usize = 2;

    /// Derives the sizing for `teacher_count` teachers.
    ///
    /// `teachers_per_group` values below [`Self::MIN_TARGET`] are clamped up.
    #[must_use]
    pub fn new(teacher_count: usize, teachers_per_group: usize) -> Self {
        let target = teachers_per_group.max(Self::MIN_TARGET);
        // round-half-up of teacher_count / target
        let target_group_count = ((2 * teacher_count + target) / (2 * target)).max(1);
        let hard_max = (target + 1).max(teacher_count.div_ceil(target_group_count) + 1);
        Self {
            target,
            target_group_count,
            hard_max,
        }
    }

    /// Requested teachers per cluster after clamping.
    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }

    /// Approximate number of clusters the run aims for.
    #[must_use]
    pub fn target_group_count(&self) -> usize {
        self.target_group_count
    }

    /// Maximum number of teachers any cluster may hold, last-resort
    /// singletons aside.
    #[must_use]
    pub fn hard_max(&self) -> usize {
        self.hard_max
    }

    pub(crate) fn has_room(&self, teachers: usize) -> bool {
        teachers < self.hard_max
    }
}
