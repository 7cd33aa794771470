//! Lookups through the `dig` command-line utility.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use dns_dumper_core::{CoreError, CoreResult, DnsResolver, RecordType, ResolveFailure};

/// Output of one `dig` invocation.
#[derive(Debug, Clone)]
struct DigOutput {
    success: bool,
    stdout: String,
    stderr: String,
}

impl From<std::process::Output> for DigOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl DigOutput {
    /// First meaningful diagnostic line, from stderr or `;;` comments on stdout.
    fn failure_message(&self) -> String {
        self.stderr
            .lines()
            .chain(self.stdout.lines().filter(|l| l.starts_with(";;")))
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map_or_else(
                || "dig exited with a failure status".to_string(),
                |l| l.trim_start_matches(";; ").to_string(),
            )
    }
}

/// What a `dig` run prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DigMode {
    /// Header comments and the answer section only.
    Answer,
    /// dig's full default output.
    Full,
}

/// dig's own per-try timer, one second under the query timeout so dig
/// reports the timeout before the caller gives up on it.
fn dig_time_secs(timeout: Duration) -> u64 {
    timeout.saturating_sub(Duration::from_secs(1)).as_secs().max(1)
}

/// [`DnsResolver`] that shells out to `dig @server name TYPE`.
///
/// Values come from the answer section of a `+noall +comments +answer` run,
/// so the response code tells `NXDOMAIN` apart from an empty `NOERROR`.
///
/// Each lookup is one child process; the child is killed if the lookup is
/// dropped (timeout or cancellation).
pub struct DigResolver {
    program: String,
    nameserver: Option<IpAddr>,
    timeout: Duration,
}

impl DigResolver {
    #[must_use]
    pub fn new(nameserver: Option<IpAddr>, timeout: Duration) -> Self {
        Self::with_program("dig", nameserver, timeout)
    }

    /// Use an explicit binary instead of `dig` from `PATH`.
    #[must_use]
    pub fn with_program(
        program: impl Into<String>,
        nameserver: Option<IpAddr>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            nameserver,
            timeout,
        }
    }

    fn args(&self, name: &str, record_type: RecordType, mode: DigMode) -> Vec<String> {
        let mut args = Vec::new();
        if mode == DigMode::Answer {
            args.extend(["+noall", "+comments", "+answer"].map(String::from));
        }
        args.push(format!("+time={}", dig_time_secs(self.timeout)));
        args.push("+tries=1".to_string());
        if let Some(ns) = self.nameserver {
            args.push(format!("@{ns}"));
        }
        args.push(name.to_string());
        args.push(record_type.to_string());
        args
    }

    async fn run(&self, args: &[String]) -> Result<DigOutput, ResolveFailure> {
        let output = Command::new(&self.program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ResolveFailure::new(format!("failed to run {}: {e}", self.program)))?;
        Ok(output.into())
    }
}

#[async_trait]
impl DnsResolver for DigResolver {
    async fn resolve(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<String>, ResolveFailure> {
        let output = self
            .run(&self.args(name, record_type, DigMode::Answer))
            .await?;
        answer_values(&output, record_type)
    }

    async fn resolve_detailed(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<String>, ResolveFailure> {
        let output = self.run(&self.args(name, record_type, DigMode::Full)).await?;
        if !output.success {
            return Err(ResolveFailure::new(output.failure_message()));
        }
        Ok(Some(output.stdout).filter(|s| !s.trim().is_empty()))
    }

    async fn check_available(&self) -> CoreResult<()> {
        match Command::new(&self.program).arg("-v").output().await {
            Ok(output) if output.status.success() => {
                // `dig -v` prints its version on stderr.
                let version = String::from_utf8_lossy(&output.stderr);
                log::debug!("Using {}", version.trim());
                Ok(())
            }
            Ok(output) => Err(CoreError::ResolverUnavailable(format!(
                "'{}' exited with {}",
                self.program, output.status
            ))),
            Err(e) => Err(CoreError::ResolverUnavailable(format!(
                "'{}' command not found ({e}). Please install bind-utils or dnsutils.",
                self.program
            ))),
        }
    }

    fn label(&self) -> String {
        self.nameserver.map_or_else(
            || format!("{} (system resolver)", self.program),
            |ns| format!("{} @{ns}", self.program),
        )
    }
}

/// Interpret an answer-mode run.
///
/// Only a `NOERROR` response yields values (possibly none). `NXDOMAIN`,
/// `SERVFAIL`, `REFUSED` and failed runs are errors.
fn answer_values(output: &DigOutput, record_type: RecordType) -> Result<Vec<String>, ResolveFailure> {
    if !output.success {
        return Err(ResolveFailure::new(output.failure_message()));
    }
    match response_status(&output.stdout) {
        Some("NOERROR") => Ok(parse_answer_section(&output.stdout, record_type)),
        Some(status) => Err(ResolveFailure::new(status)),
        None => Err(ResolveFailure::new(output.failure_message())),
    }
}

/// Response code from the `->>HEADER<<-` comment line.
fn response_status(stdout: &str) -> Option<&str> {
    stdout
        .lines()
        .filter(|line| line.contains("->>HEADER<<-"))
        .find_map(|line| {
            let start = line.find("status:")? + "status:".len();
            line[start..].split(',').next().map(str::trim)
        })
}

/// Record data of the answer lines whose type matches `record_type`.
///
/// CNAME chain records printed ahead of the requested type are skipped.
/// Values match the hickory backend: trailing dots are removed from names,
/// TXT character-strings are unquoted and joined, and key or digest material
/// dig splits over several tokens is rejoined.
fn parse_answer_section(stdout: &str, record_type: RecordType) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(';'))
        .filter_map(|line| {
            // owner, ttl, class, type, rdata
            let (fields, rdata) = split_fields(line, 4)?;
            fields[3]
                .eq_ignore_ascii_case(record_type.as_str())
                .then(|| normalize_rdata(rdata, record_type))
        })
        .collect()
}

fn split_fields(line: &str, count: usize) -> Option<(Vec<&str>, &str)> {
    let mut fields = Vec::with_capacity(count);
    let mut rest = line.trim_start();
    for _ in 0..count {
        let end = rest.find(char::is_whitespace)?;
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    Some((fields, rest.trim_end()))
}

fn normalize_rdata(rdata: &str, record_type: RecordType) -> String {
    if record_type == RecordType::Txt {
        return unquote_txt(rdata);
    }
    let tokens: Vec<&str> = rdata
        .split_whitespace()
        .map(|token| token.trim_end_matches('.'))
        .collect();
    match record_type {
        RecordType::Dnskey | RecordType::Ds if tokens.len() > 3 => {
            format!("{} {}", tokens[..3].join(" "), tokens[3..].concat())
        }
        _ => tokens.join(" "),
    }
}

/// Contents of the quoted character-strings in `rdata`, concatenated.
fn unquote_txt(rdata: &str) -> String {
    let mut out = String::with_capacity(rdata.len());
    let mut quoted = false;
    let mut chars = rdata.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => quoted = !quoted,
            '\\' if quoted => out.extend(chars.next()),
            c if quoted => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn answer(status: &str, records: &str) -> DigOutput {
        DigOutput {
            success: true,
            stdout: format!(
                ";; Got answer:\n;; ->>HEADER<<- opcode: QUERY, status: {status}, id: 4242\n\
                 ;; flags: qr rd ra; QUERY: 1, ANSWER: 2, AUTHORITY: 0, ADDITIONAL: 1\n\n\
                 ;; ANSWER SECTION:\n{records}"
            ),
            stderr: String::new(),
        }
    }

    #[test]
    fn test_a_skips_cname_chain() {
        let output = answer(
            "NOERROR",
            "www.example.com.\t300\tIN\tCNAME\tweb.example.net.\n\
             web.example.net.\t60\tIN\tA\t192.0.2.1\n\
             web.example.net.\t60\tIN\tA\t192.0.2.2\n",
        );
        assert_eq!(
            answer_values(&output, RecordType::A).unwrap(),
            vec!["192.0.2.1", "192.0.2.2"]
        );
    }

    #[test]
    fn test_nxdomain_is_an_error() {
        let output = answer("NXDOMAIN", "");
        let err = answer_values(&output, RecordType::A).unwrap_err();
        assert_eq!(err.to_string(), "NXDOMAIN");
    }

    #[test]
    fn test_servfail_is_an_error() {
        let output = answer("SERVFAIL", "");
        assert!(answer_values(&output, RecordType::Mx).is_err());
    }

    #[test]
    fn test_noerror_without_answer_is_empty() {
        let output = answer("NOERROR", "");
        assert!(answer_values(&output, RecordType::Caa).unwrap().is_empty());
    }

    #[test]
    fn test_missing_header_is_an_error() {
        let output = DigOutput {
            success: true,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(answer_values(&output, RecordType::A).is_err());
    }

    #[test]
    fn test_response_status() {
        let out = ";; ->>HEADER<<- opcode: QUERY, status: REFUSED, id: 1\n";
        assert_eq!(response_status(out), Some("REFUSED"));
        assert_eq!(response_status(";; Got answer:\n"), None);
    }

    #[test]
    fn test_names_lose_trailing_dots() {
        let mx = "example.com.\t\t300\tIN\tMX\t10 mx1.example.com.\n\
                  example.com.\t\t300\tIN\tMX\t20 mx2.example.com.\n";
        assert_eq!(
            parse_answer_section(mx, RecordType::Mx),
            vec!["10 mx1.example.com", "20 mx2.example.com"]
        );

        let soa = "example.com. 3600 IN SOA ns1.example.com. hostmaster.example.com. 2024 7200 3600 1209600 300\n";
        assert_eq!(
            parse_answer_section(soa, RecordType::Soa),
            vec!["ns1.example.com hostmaster.example.com 2024 7200 3600 1209600 300"]
        );
    }

    #[test]
    fn test_txt_strings_unquoted_and_joined() {
        let txt = "example.com.\t300\tIN\tTXT\t\"v=spf1 include:_spf.example.com. \" \"-all\"\n\
                   example.com.\t300\tIN\tTXT\t\"say \\\"hi\\\"\"\n";
        assert_eq!(
            parse_answer_section(txt, RecordType::Txt),
            vec!["v=spf1 include:_spf.example.com. -all", "say \"hi\""]
        );
    }

    #[test]
    fn test_ds_digest_rejoined() {
        let ds = "example.com. 3600 IN DS 370 13 2 BE74359954660069D5C63D200C39F560 7A9A1C3A0A9A0A7E0A6E8E5C9C2E0C11\n";
        assert_eq!(
            parse_answer_section(ds, RecordType::Ds),
            vec!["370 13 2 BE74359954660069D5C63D200C39F5607A9A1C3A0A9A0A7E0A6E8E5C9C2E0C11"]
        );
    }

    #[test]
    fn test_args_include_server_and_type() {
        let dig = DigResolver::new(Some("8.8.8.8".parse().unwrap()), Duration::from_secs(10));
        let args = dig.args("example.com", RecordType::Dnskey, DigMode::Answer);
        assert_eq!(&args[..3], ["+noall", "+comments", "+answer"]);
        assert!(args.contains(&"@8.8.8.8".to_string()));
        assert_eq!(&args[args.len() - 2..], ["example.com", "DNSKEY"]);

        let detailed = dig.args("example.com", RecordType::Soa, DigMode::Full);
        assert!(!detailed.contains(&"+noall".to_string()));
    }

    #[test]
    fn test_dig_timer_below_query_timeout() {
        assert_eq!(dig_time_secs(Duration::from_secs(10)), 9);
        assert_eq!(dig_time_secs(Duration::from_secs(2)), 1);
        assert_eq!(dig_time_secs(Duration::from_secs(1)), 1);
        assert_eq!(dig_time_secs(Duration::from_millis(300)), 1);

        let dig = DigResolver::new(None, Duration::from_secs(10));
        assert!(dig
            .args("example.com", RecordType::A, DigMode::Answer)
            .contains(&"+time=9".to_string()));
    }

    #[test]
    fn test_failure_message_prefers_stderr() {
        let output = DigOutput {
            success: false,
            stdout: ";; connection timed out; no servers could be reached\n".into(),
            stderr: String::new(),
        };
        assert_eq!(
            output.failure_message(),
            "connection timed out; no servers could be reached"
        );
    }

    #[tokio::test]
    async fn test_missing_binary_is_unavailable() {
        let dig = DigResolver::with_program(
            "definitely-not-a-dig-binary",
            None,
            Duration::from_secs(1),
        );
        assert!(matches!(
            dig.check_available().await,
            Err(CoreError::ResolverUnavailable(_))
        ));
        assert!(dig.resolve("example.com", RecordType::A).await.is_err());
    }
}
