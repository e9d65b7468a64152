//! Summary statistics over a list of sales.

use std::collections::HashMap;

use serde::Serialize;
use time::{Date, UtcOffset};

use super::core::Sale;

/// Totals shown at the top of the sales screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SaleStatistics {
    /// The sum of the totals of all sales.
    pub total_amount: f64,
    /// The sum of the totals of the sales made on the current local date.
    pub today_amount: f64,
    /// The number of units sold across all sales.
    pub total_quantity: u64,
    /// The name of the product with the most units sold, empty if there are no sales.
    pub top_product: String,
    /// The number of units sold of [SaleStatistics::top_product].
    pub top_product_quantity: u64,
}

/// Compute the statistics for `sales`.
///
/// A sale counts towards today's amount when its timestamp, converted to
/// `local_offset`, falls on the date `today`. Both are passed in by the
/// caller so the result does not depend on the clock of the machine.
///
/// Products are grouped by name (without brand). When two products sold the
/// same number of units, the one that appears first in `sales` wins.
///
/// Never fails, an empty list gives zero totals and an empty top product.
pub fn compute_statistics(sales: &[Sale], today: Date, local_offset: UtcOffset) -> SaleStatistics {
    let mut statistics = SaleStatistics::default();

    for sale in sales {
        statistics.total_amount += sale.total();
        statistics.total_quantity += u64::from(sale.quantity());

        if sale.timestamp().to_offset(local_offset).date() == today {
            statistics.today_amount += sale.total();
        }
    }

    if let Some((name, quantity)) = top_product(sales) {
        statistics.top_product = name.to_owned();
        statistics.top_product_quantity = quantity;
    }

    statistics
}

/// The product name with the most units sold and that number of units.
///
/// Ties go to the name that was seen first.
fn top_product(sales: &[Sale]) -> Option<(&str, u64)> {
    let mut totals: Vec<(&str, u64)> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for sale in sales {
        let name = sale.product().name();
        let index = *index_by_name.entry(name).or_insert_with(|| {
            totals.push((name, 0));
            totals.len() - 1
        });
        totals[index].1 += u64::from(sale.quantity());
    }

    totals.into_iter().fold(None, |best, candidate| match best {
        Some((_, best_quantity)) if best_quantity >= candidate.1 => best,
        _ => Some(candidate),
    })
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime, offset};

    use crate::sale::core::Sale;

    use super::{SaleStatistics, compute_statistics};

    fn sale(product: &str, quantity: u32, total: f64) -> Sale {
        Sale::build(product, datetime!(2024-03-01 12:00 UTC))
            .quantity(quantity)
            .total(total)
            .finalise()
    }

    #[test]
    fn empty_list_gives_zero_statistics() {
        let got = compute_statistics(&[], date!(2024 - 03 - 05), offset!(UTC));

        assert_eq!(got, SaleStatistics::default());
        assert_eq!(got.top_product, "");
    }

    #[test]
    fn sums_totals_and_quantities() {
        let sales = vec![
            sale("Milk - Dairy", 3, 9.0),
            sale("Bread - Bakery", 2, 4.0),
            sale("Milk - Dairy", 1, 3.0),
        ];

        let got = compute_statistics(&sales, date!(2024 - 03 - 05), offset!(UTC));

        assert_eq!(got.total_amount, 16.0);
        assert_eq!(got.total_quantity, 6);
        assert_eq!(got.top_product, "Milk");
        assert_eq!(got.top_product_quantity, 4);
        assert_eq!(got.today_amount, 0.0);
    }

    #[test]
    fn top_product_groups_by_name_across_brands() {
        let sales = vec![
            sale("Bread - Bakery", 3, 3.0),
            sale("Milk - Dairy", 2, 2.0),
            sale("Milk - Farm", 2, 2.0),
        ];

        let got = compute_statistics(&sales, date!(2024 - 03 - 05), offset!(UTC));

        assert_eq!(got.top_product, "Milk");
        assert_eq!(got.top_product_quantity, 4);
    }

    #[test]
    fn top_product_ties_go_to_first_seen() {
        let sales = vec![
            sale("Eggs - Farm", 2, 2.0),
            sale("Milk - Dairy", 1, 1.0),
            sale("Milk - Dairy", 1, 1.0),
        ];

        let got = compute_statistics(&sales, date!(2024 - 03 - 05), offset!(UTC));

        assert_eq!(got.top_product, "Eggs");
    }

    #[test]
    fn today_amount_only_counts_sales_on_local_date() {
        let sales = vec![
            Sale::build("A", datetime!(2024-03-05 10:00 UTC))
                .total(5.0)
                .finalise(),
            Sale::build("B", datetime!(2024-03-04 23:30 UTC))
                .total(7.0)
                .finalise(),
            Sale::build("C", datetime!(2023-03-05 10:00 UTC))
                .total(11.0)
                .finalise(),
        ];

        let got = compute_statistics(&sales, date!(2024 - 03 - 05), offset!(UTC));

        assert_eq!(got.today_amount, 5.0);
        assert_eq!(got.total_amount, 23.0);
    }

    #[test]
    fn today_amount_uses_local_offset() {
        // 03:00 UTC on the 5th is still the evening of the 4th at UTC-6.
        let sales = vec![
            Sale::build("A", datetime!(2024-03-05 03:00 UTC))
                .total(5.0)
                .finalise(),
            Sale::build("B", datetime!(2024-03-05 18:00 UTC))
                .total(7.0)
                .finalise(),
        ];

        let got = compute_statistics(&sales, date!(2024 - 03 - 05), offset!(-6));

        assert_eq!(got.today_amount, 7.0);
    }
}
