use crate::snapshot::NetworkInfo;
use crate::sources::Source;

pub async fn collect<S: Source>(source: &S) -> NetworkInfo {
    NetworkInfo {
        ifconfig: source.run_command("ifconfig", &[]).await,
        ip: source.run_command("ip", &["addr", "show"]).await,
        netstat: source.run_command("netstat", &["-an"]).await,
        ss: source.run_command("ss", &["-tan"]).await,
    }
}
