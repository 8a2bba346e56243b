//! Diagnostics for a station credentials file.

use crate::cli::CliContext;
use crate::constants;
use crate::core::credstore::CredentialsStore;
use crate::util::fs as cred_fs;
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Treat warnings (unfilled or missing keys, loose permissions) as failures
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub pass: u32,
    pub warn: u32,
    pub fail: u32,
    pub lines: Vec<String>,
}

impl Report {
    fn pass(&mut self, msg: String) {
        self.lines.push(format!("  [PASS] {}", msg));
        self.pass += 1;
    }

    fn warn(&mut self, msg: String) {
        self.lines.push(format!("  [WARN] {}", msg));
        self.warn += 1;
    }

    fn fail(&mut self, msg: String) {
        self.lines.push(format!("  [FAIL] {}", msg));
        self.fail += 1;
    }
}

pub fn run(ctx: &CliContext, args: DoctorArgs) -> Result<()> {
    let report = check(ctx);

    println!("Doctor: {}", ctx.config.path.display());
    for line in &report.lines {
        println!("{}", line);
    }
    println!();
    println!(
        "Doctor summary: {} pass, {} warn, {} fail",
        report.pass, report.warn, report.fail
    );
    if report.fail > 0 || (args.strict && report.warn > 0) {
        std::process::exit(1);
    }
    Ok(())
}

pub fn check(ctx: &CliContext) -> Report {
    let path = &ctx.config.path;
    let mut report = Report::default();

    if path.is_file() {
        report.pass(format!("credentials file exists: {}", path.display()));
    } else {
        report.fail(format!(
            "credentials file missing: {} (run: panthyr-credentials init)",
            path.display()
        ));
        return report;
    }

    let store = match CredentialsStore::open(ctx.config.clone()) {
        Ok(store) => {
            report.pass(format!(
                "[{}] section found ({} entries)",
                constants::CREDENTIALS_SECTION,
                store.len()
            ));
            store
        }
        Err(e) => {
            report.fail(format!("{}", e));
            return report;
        }
    };

    let missing = store.missing_keys();
    if missing.is_empty() {
        report.pass("all template keys present".to_string());
    } else {
        report.warn(format!("missing keys: {}", missing.join(", ")));
    }

    let unfilled = store.unfilled_keys();
    if unfilled.is_empty() {
        report.pass("all template keys filled".to_string());
    } else {
        report.warn(format!("empty values: {}", unfilled.join(", ")));
    }

    if let Some(mode) = cred_fs::file_mode(path) {
        if mode == constants::CRED_FILE_MODE {
            report.pass(format!("file mode ok: {:04o}", mode));
        } else {
            report.warn(format!(
                "file mode: {:04o} (expected {:04o})",
                mode,
                constants::CRED_FILE_MODE
            ));
        }
    }

    report
}
