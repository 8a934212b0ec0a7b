use crate::models::VehicleRecord;

/// Drop unbookable records (no finite pay-now price) and sort the rest
/// cheapest first. The sort is stable, so equal prices keep their merge order.
pub fn finalize(records: Vec<VehicleRecord>) -> Vec<VehicleRecord> {
    let mut bookable: Vec<(f64, VehicleRecord)> = records
        .into_iter()
        .filter_map(|r| match r.price_pay_now {
            Some(price) if price.is_finite() => Some((price, r)),
            _ => None,
        })
        .collect();

    bookable.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    bookable.into_iter().map(|(_, r)| r).collect()
}
