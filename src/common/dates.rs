// src/common/dates.rs

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::America::Sao_Paulo;
use chrono_tz::Tz;

/// Combina a data (DD/MM/AAAA) e a hora (HH:MM) que a Zaia manda separadas
/// em uma única string "DD/MM/AAAA às HH:MM" no fuso de Brasília.
///
/// Se qualquer componente não parsear, devolve a concatenação literal —
/// é só texto de exibição, não vale derrubar a requisição por isso.
pub fn combine_meeting_datetime(date_str: &str, time_str: &str) -> String {
    match parse_sao_paulo(date_str, time_str) {
        Some(dt) => dt.format("%d/%m/%Y às %H:%M").to_string(),
        None => format!("{} às {}", date_str, time_str),
    }
}

fn parse_sao_paulo(date_str: &str, time_str: &str) -> Option<DateTime<Tz>> {
    let mut date_parts = date_str.split('/');
    let day: u32 = date_parts.next()?.parse().ok()?;
    let month: u32 = date_parts.next()?.parse().ok()?;
    let year: i32 = date_parts.next()?.parse::<u32>().ok()?.try_into().ok()?;
    if date_parts.next().is_some() {
        return None;
    }

    let mut time_parts = time_str.split(':');
    let hour: u32 = time_parts.next()?.parse().ok()?;
    let minute: u32 = time_parts.next()?.parse().ok()?;
    if time_parts.next().is_some() {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Sao_Paulo.from_local_datetime(&date.and_time(time)).single()
}

#[cfg(test)]
mod tests {
    use super::combine_meeting_datetime;

    #[test]
    fn combines_valid_date_and_time() {
        assert_eq!(
            combine_meeting_datetime("27/09/2025", "05:00"),
            "27/09/2025 às 05:00"
        );
    }

    #[test]
    fn pads_single_digit_components() {
        assert_eq!(
            combine_meeting_datetime("5/1/2025", "9:30"),
            "05/01/2025 às 09:30"
        );
    }

    #[test]
    fn falls_back_on_unparseable_date() {
        assert_eq!(combine_meeting_datetime("bad", "05:00"), "bad às 05:00");
    }

    #[test]
    fn falls_back_on_out_of_range_date() {
        assert_eq!(
            combine_meeting_datetime("31/02/2025", "05:00"),
            "31/02/2025 às 05:00"
        );
    }

    #[test]
    fn falls_back_on_bad_time() {
        assert_eq!(
            combine_meeting_datetime("27/09/2025", "5h00"),
            "27/09/2025 às 5h00"
        );
        assert_eq!(
            combine_meeting_datetime("27/09/2025", "25:00"),
            "27/09/2025 às 25:00"
        );
    }

    #[test]
    fn falls_back_on_extra_components() {
        assert_eq!(
            combine_meeting_datetime("27/09/2025/1", "05:00"),
            "27/09/2025/1 às 05:00"
        );
        assert_eq!(
            combine_meeting_datetime("27/09/2025", "05:00:30"),
            "27/09/2025 às 05:00:30"
        );
    }
}
