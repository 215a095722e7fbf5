use crate::snapshot::PowerMgmt;
use crate::sources::Source;

pub async fn collect<S: Source>(source: &S) -> PowerMgmt {
    PowerMgmt {
        max_cstate: source
            .read_file("/sys/module/intel_idle/parameters/max_cstate")
            .await,
    }
}
