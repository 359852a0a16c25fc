//! In-memory CSV tables shared by the integration tests.
//!
//! The rows cover the interesting resolution cases: a straightforward
//! Madison pair, a Milwaukee pair, a shared-name Assembly pair broken up
//! by district number, and a Racine-area pair whose published emails are
//! both unusable.

use std::sync::Arc;

use bv_directory::Directory;

/// Senate roster. Wanggaard's email cell fails validation and is blanked
/// at load, which exercises the partial-recipient paths.
pub const SENATE_CSV: &str = "\
First Name,Last Name,Party,Chamber,District,Photo,Email,Phone
Kelda,Roys,D,Senate,26,,sen.roys@legis.wisconsin.gov,6082661627
Dora,Drake,D,Senate,4,,sen.drake@legis.wisconsin.gov,6082662500
Van,Wanggaard,R,Senate,21,,not-an-email,6082661832
";

/// Assembly roster with a John Smith in two districts and one member
/// whose email cell is unusable.
pub const ASSEMBLY_CSV: &str = "\
First Name,Last Name,Party,Chamber,District,Photo,Email,Phone
Renuka,Mayadev,D,Assembly,76,,rep.mayadev@legis.wisconsin.gov,6082660960
Darrin,Madison,D,Assembly,10,,rep.madison@legis.wisconsin.gov,6082660645
Angelito,Cruz,D,Assembly,66,,also-not-an-email,6082661234
John,Smith,R,Assembly,61,,rep.smith61@legis.wisconsin.gov,6082665555
John,Smith,R,Assembly,62,,rep.smith62@legis.wisconsin.gov,6082666666
";

/// ZIP-to-district map. 53401 maps to the pair with no usable emails.
pub const DISTRICTS_CSV: &str = "\
Zip Code,Senate District,Assembly District,Senator First Name,Senator Last Name,Representative First Name,Representative Last Name
53703,26,76,Kelda,Roys,Renuka,Mayadev
53202,4,10,Dora,Drake,Darrin,Madison
53140,21,61,Van,Wanggaard,John,Smith
53186,21,62,Van,Wanggaard,John,Smith
53401,21,66,Van,Wanggaard,Angelito,Cruz
";

/// Build a directory from the fixture tables.
pub fn sample_directory() -> Arc<Directory> {
    Arc::new(
        Directory::from_csv(SENATE_CSV, ASSEMBLY_CSV, DISTRICTS_CSV)
            .expect("fixture tables parse"),
    )
}
