use crate::domain::model::{NormalizedNumber, ParsedNumber};
use isocountry::CountryCode;
use rlibphonenumber::{PhoneNumber, PhoneNumberFormat, Region};

/// 解析並正規化電話號碼
///
/// `region_hint` is the default country for numbers written without a
/// `+<country code>` prefix. It is not validated: an unknown code leaves the
/// parser without a default, so only fully international numbers parse.
pub fn normalize(raw_number: &str, region_hint: &str) -> NormalizedNumber {
    let default_region = region_id(region_hint);
    if default_region.is_none() {
        tracing::debug!("Region hint '{}' is not a known region", region_hint);
    }

    match PhoneNumber::parse(raw_number, default_region) {
        Ok(number) => NormalizedNumber::Parsed(describe(&number)),
        Err(e) => {
            tracing::debug!("Failed to parse '{}': {}", raw_number, e);
            NormalizedNumber::Error {
                message: e.to_string(),
            }
        }
    }
}

fn region_id(region_hint: &str) -> Option<Region> {
    region_hint.trim().parse().ok()
}

fn describe(number: &PhoneNumber) -> ParsedNumber {
    let carrier = number.preferred_domestic_carrier_code();
    ParsedNumber {
        e164: number.format_as(PhoneNumberFormat::E164).into_owned(),
        national: number.format_as(PhoneNumberFormat::National).into_owned(),
        international: number
            .format_as(PhoneNumberFormat::International)
            .into_owned(),
        is_valid: number.is_valid(),
        carrier: (!carrier.is_empty()).then(|| carrier.to_string()),
        region: number.get_region_code().and_then(region_name),
    }
}

/// 區碼轉英文國名；非地理號碼（001）沒有名稱
fn region_name(region: Region) -> Option<String> {
    CountryCode::for_alpha2(region.as_region_str().as_str())
        .ok()
        .map(|country| country.name().to_string())
}
