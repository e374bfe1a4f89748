/*!
# Pair Reconciler
Joins the ANI records with the AF matrix on the canonical genome pair.
The join is driven entirely by the ANI side: every ANI record yields exactly one merged record, in the same order.
AF values with no matching ANI record are dropped, and ANI records without an AF value keep an empty AF.

## Example usage
```rust
use std::io::Cursor;
use pairtab::parsing::af_matrix::{AfMatrix, AfSymmetry};
use pairtab::parsing::ani_matrix::AniMatrix;
use pairtab::reconciler::reconcile;

let ani = AniMatrix::from_reader(Cursor::new("2\ng1.fasta\ng2.fasta\t98.50\n")).unwrap();
let af = AfMatrix::from_reader(Cursor::new("g1\tg2\n100.0\t0.95\n0.95\t100.0\n"), AfSymmetry::LastWins).unwrap();
let merged = reconcile(&ani, &af);
assert_eq!(merged.len(), 1);
assert_eq!(merged[0].pair().genome1(), "g1");
assert_eq!(merged[0].ani(), "98.50");
assert_eq!(merged[0].af(), Some("0.95"));
```
*/
use log::{debug, info};

use crate::data_types::pair_records::MergedRecord;
use crate::parsing::af_matrix::AfMatrix;
use crate::parsing::ani_matrix::AniMatrix;

/// Left joins the AF values onto the ANI records.
/// # Arguments
/// * `ani_matrix` - the parsed ANI matrix, which defines the output rows and their order
/// * `af_matrix` - the parsed AF matrix, only used for lookups
pub fn reconcile(ani_matrix: &AniMatrix, af_matrix: &AfMatrix) -> Vec<MergedRecord> {
    let mut num_missing_af = 0;
    let merged: Vec<MergedRecord> = ani_matrix.records().iter()
        .map(|ani_record| {
            let af = af_matrix.get(ani_record.pair()).map(|s| s.to_string());
            if af.is_none() {
                debug!("No AF value for {}", ani_record.pair());
                num_missing_af += 1;
            }
            MergedRecord::new(ani_record.pair().clone(), ani_record.ani().to_string(), af)
        })
        .collect();

    info!("Merged {} genome pairs, {num_missing_af} without an AF value", merged.len());
    merged
}
