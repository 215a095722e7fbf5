use crate::snapshot::HugePages;
use crate::sources::Source;

const THP_DIR: &str = "/sys/kernel/mm/transparent_hugepage";

pub async fn collect<S: Source>(source: &S) -> HugePages {
    HugePages {
        enabled: source.read_file(&format!("{THP_DIR}/enabled")).await,
        defrag: source.read_file(&format!("{THP_DIR}/defrag")).await,
    }
}
