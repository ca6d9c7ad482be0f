//! Ticket prices and travel time estimates for a resolved route.

/// Price bands as `(max stations travelled, price)`, cheapest first.
const PRICE_BANDS: &[(usize, u32)] = &[(9, 8), (16, 10), (23, 15)];

/// Price for a journey longer than every band.
const TOP_PRICE: u32 = 20;

/// Surcharge per line change.
const TRANSFER_FEE: u32 = 2;

/// Minutes allowed per station on the route.
const MINUTES_PER_STATION: u32 = 2;

/// Ticket price for a route through `stations` distinct stations (both ends
/// included) with `transfers` line changes.
///
/// # Examples
///
/// ```
/// use metro_server::planner::ticket_price;
///
/// assert_eq!(ticket_price(9, 0), 8);
/// assert_eq!(ticket_price(10, 1), 12);
/// ```
pub fn ticket_price(stations: usize, transfers: usize) -> u32 {
    let base = PRICE_BANDS
        .iter()
        .find(|(max, _)| stations <= *max)
        .map_or(TOP_PRICE, |&(_, price)| price);
    base + TRANSFER_FEE * transfers as u32
}

/// Estimated journey time in minutes.
pub fn travel_minutes(stations: usize) -> u32 {
    MINUTES_PER_STATION * stations as u32
}
