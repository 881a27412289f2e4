use super::LogLineParser;
use crate::error::MalformedReason;
use crate::log_parser::extractors;
use crate::log_parser::record::LogRecord;

// Whitespace positions, counting the two-token timestamp and three-token request.
const STATUS_TOKEN: usize = 8;
const BYTES_TOKEN: usize = 9;

/// Parser for the web-hosting access log layout:
///
/// `IP - - [DATE:TIME ZONE] "METHOD URL PROTOCOL" STATUS BYTES "-" "USER_AGENT" WEBSITE DEST_IP`
pub struct HostingLogParser;

impl LogLineParser for HostingLogParser {
    fn parse_line(&self, line: &str) -> Result<LogRecord, MalformedReason> {
        let first = extractors::leading_token(line).unwrap_or_default();
        let ip = extractors::validate_ip(first)
            .ok_or_else(|| MalformedReason::InvalidIp(first.to_string()))?;

        let date = extractors::date(line).ok_or(MalformedReason::MissingTimestamp)?;
        let time = extractors::time(line).ok_or(MalformedReason::MissingTimestamp)?;
        let request = extractors::request(line).ok_or(MalformedReason::MissingRequest)?;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let status_token = tokens
            .get(STATUS_TOKEN)
            .ok_or(MalformedReason::MissingStatus)?;
        let status = status_token
            .parse::<u16>()
            .map_err(|_| MalformedReason::InvalidStatus(status_token.to_string()))?;
        let bytes = tokens
            .get(BYTES_TOKEN)
            .ok_or(MalformedReason::MissingBytes)?;

        Ok(LogRecord {
            ip: ip.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            method: request.method.to_string(),
            url: request.url.to_string(),
            protocol: request.protocol.to_string(),
            status,
            bytes: bytes.to_string(),
            user_agent: extractors::user_agent(line).unwrap_or_default().to_string(),
            // at least BYTES_TOKEN + 1 tokens exist here, so both are present
            website: extractors::website(line).unwrap_or_default().to_string(),
            dest_url: extractors::dest_url(line).unwrap_or_default().to_string(),
        })
    }

    fn is_record_start(&self, line: &str) -> bool {
        extractors::leading_token(line)
            .and_then(extractors::validate_ip)
            .is_some()
    }
}
