//! Reader for exported groupings, one group per line.

use std::io::BufRead;

use crate::{errors::PairsProviderError, parse::split_cells};

/// Reads groups of member names from `reader`.
///
/// Members are separated by tabs, or by commas when a line has no tab. Blank
/// cells and blank lines are skipped.
///
/// # Errors
/// Returns [`PairsProviderError::Io`] when reading fails.
///
/// # Examples
/// ```
/// use cohort_providers_pairs::read_groupings;
///
/// let groups = read_groupings("T1\tT2\tS1\t\n\nT3,S2\n".as_bytes())?;
/// assert_eq!(groups, [vec!["T1", "T2", "S1"], vec!["T3", "S2"]]);
/// # Ok::<(), cohort_providers_pairs::PairsProviderError>(())
/// ```
pub fn read_groupings<R: BufRead>(reader: R) -> Result<Vec<Vec<String>>, PairsProviderError> {
    let mut groups = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let cells = split_cells(&line);
        if !cells.is_empty() {
            groups.push(cells.into_iter().map(str::to_owned).collect());
        }
    }
    Ok(groups)
}
