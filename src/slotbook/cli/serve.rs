//! JSON-lines transport for [`slotbook::service`]: one request per input
//! line, one response per output line.

use slotbook::service::handle_line;
use slotbook::{BookingCoordinator, Result};
use std::io::{BufRead, Write};

pub fn run<R: BufRead, W: Write>(coordinator: &BookingCoordinator, input: R, mut out: W) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(coordinator, &line)?;
        writeln!(out, "{}", response)?;
        out.flush()?;
    }
    tracing::debug!("input closed, serve loop done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn one_response_per_request_line() {
        let coordinator = BookingCoordinator::new();
        let input = concat!(
            r#"{"op": "register_provider", "name": "Alex"}"#,
            "\n\n",
            r#"{"op": "register_client", "name": "Pete"}"#,
            "\n",
            r#"{"op": "book", "client": 1, "provider": 1, "slot": "10:00"}"#,
            "\n",
            r#"{"op": "book", "client": 1, "provider": 1, "slot": "10:00"}"#,
            "\n",
        );
        let mut out = Vec::new();
        run(&coordinator, input.as_bytes(), &mut out).unwrap();

        let responses: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 4);
        assert_eq!(responses[2]["ok"], true);
        assert_eq!(responses[3]["error"]["kind"], "slot_not_found");
    }
}
