use quick_xml::Reader;
use quick_xml::events::Event;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

use super::client::RateError;

/// Parse a daily rates document into `code -> local units per one unit`.
///
/// Records with a missing or malformed code, nominal or value are skipped.
pub fn parse_cbr_xml(xml: &str) -> Result<BTreeMap<String, Decimal>, RateError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut rates = BTreeMap::new();
    let mut path: Vec<String> = Vec::new();
    let mut current: Option<ValuteRecord> = None;
    let mut seen_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                if path.is_empty() {
                    seen_root = name == "ValCurs";
                }
                if name == "Valute" {
                    current = Some(ValuteRecord::default());
                }
                path.push(name);
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default().to_string();
                if let (Some(rec), Some(field)) = (current.as_mut(), path.last()) {
                    match field.as_str() {
                        "CharCode" => rec.code = Some(text),
                        "Nominal" => rec.nominal = Some(text),
                        "Value" => rec.value = Some(text),
                        _ => {}
                    }
                }
            }
            Ok(Event::End(_)) => {
                let ended = path.pop().unwrap_or_default();
                if ended == "Valute" {
                    if let Some(rec) = current.take() {
                        match rec.into_rate() {
                            Some((code, rate)) => {
                                rates.insert(code, rate);
                            }
                            None => tracing::debug!("skipping malformed Valute record"),
                        }
                    }
                }
            }
            Ok(Event::Eof) => {
                if !path.is_empty() {
                    return Err(RateError::Parse(format!(
                        "document ended inside <{}>",
                        path.join("/")
                    )));
                }
                break;
            }
            Err(e) => {
                return Err(RateError::Parse(format!(
                    "XML error at position {}: {e}",
                    reader.error_position()
                )));
            }
            _ => {}
        }
    }

    if !seen_root {
        return Err(RateError::Parse("missing ValCurs root element".into()));
    }

    Ok(rates)
}

#[derive(Default)]
struct ValuteRecord {
    code: Option<String>,
    nominal: Option<String>,
    value: Option<String>,
}

impl ValuteRecord {
    fn into_rate(self) -> Option<(String, Decimal)> {
        let code = self.code?.trim().to_uppercase();
        let nominal = parse_feed_decimal(&self.nominal?)?;
        let value = parse_feed_decimal(&self.value?)?;
        if code.len() != 3 || nominal <= Decimal::ZERO || value <= Decimal::ZERO {
            return None;
        }
        let rate = value.checked_div(nominal)?;
        (rate > Decimal::ZERO).then_some((code, rate))
    }
}

/// The feed uses `,` as the fractional separator.
fn parse_feed_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(&s.trim().replace(',', ".")).ok()
}
