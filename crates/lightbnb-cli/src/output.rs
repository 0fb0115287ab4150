use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use lightbnb_db::{PropertyListing, ReservationListing, User};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `cost_per_night` is stored in cents.
pub fn format_cents(cents: i32) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}

pub fn format_rating(rating: Option<Decimal>) -> String {
    match rating {
        Some(r) => r.round_dp(2).normalize().to_string(),
        None => "-".to_string(),
    }
}

fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold).fg(Color::Cyan)),
        );
    table
}

pub fn listings_table(hits: &[PropertyListing]) -> Table {
    let mut t = table(&["ID", "Title", "City", "Owner", "Per night", "Rating"]);
    for hit in hits {
        let p = &hit.property;
        t.add_row(vec![
            Cell::new(p.id).fg(Color::Yellow),
            Cell::new(&p.title),
            Cell::new(format!("{}, {}", p.city, p.province)),
            Cell::new(p.owner_id),
            Cell::new(format_cents(p.cost_per_night)).fg(Color::Green),
            Cell::new(format_rating(hit.average_rating)),
        ]);
    }
    t
}

pub fn reservations_table(rows: &[ReservationListing]) -> Table {
    let mut t = table(&["Reservation", "Property", "City", "From", "To", "Per night", "Rating"]);
    for r in rows {
        t.add_row(vec![
            Cell::new(r.reservation_id).fg(Color::Yellow),
            Cell::new(&r.property.title),
            Cell::new(&r.property.city),
            Cell::new(r.start_date),
            Cell::new(r.end_date),
            Cell::new(format_cents(r.property.cost_per_night)).fg(Color::Green),
            Cell::new(format_rating(r.average_rating)),
        ]);
    }
    t
}

pub fn user_table(user: &User) -> Table {
    let mut t = table(&["ID", "Name", "Email"]);
    t.add_row(vec![
        Cell::new(user.id).fg(Color::Yellow),
        Cell::new(&user.name),
        Cell::new(&user.email),
    ]);
    t
}
