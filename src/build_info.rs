/// Version and git information baked in by the build script.
pub fn report(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "version": env!("CARGO_PKG_VERSION"),
        "git_describe": env!("GIT_DESCRIBE"),
        "git_hash": env!("GIT_HASH"),
    })
}

pub fn print_report(name: &str) {
    let report = report(name);
    match serde_json::to_string_pretty(&report) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{report}"),
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn report_fields() {
        let r = report("diffusion");
        assert_eq!(r["name"], "diffusion");
        assert_eq!(r["version"], env!("CARGO_PKG_VERSION"));
        assert!(r["git_hash"].is_string());
    }
}
