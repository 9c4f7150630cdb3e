//! Built-in sample used by the command line tool.

use crate::error::Result;
use crate::table::PricingTable;

/// Product name of the sample document set.
pub const SAMPLE_PRODUCT: &str = "ESD Mat Roll";

/// Four mat roll sizes with two quantity breaks.
pub fn sample_table() -> Result<PricingTable> {
    PricingTable::builder(["Sizes", "Qty 1-9", "Qty 10+"])
        .row(["24\" x 50'", "$443.78 USD", "$406.80 USD"])
        .row(["30\" x 50'", "$554.72 USD", "$508.49 USD"])
        .row(["36\" x 50'", "$665.66 USD", "$610.19 USD"])
        .row(["48\" x 50'", "$887.54 USD", "$813.57 USD"])
        .build()
}

/// Short instructions printed after the sample has been generated.
pub fn usage_hint() -> &'static str {
    concat!(
        "To render your own product, build a table and call the library:\n",
        "\n",
        "    let table = PricingTable::builder([\"Size\", \"Price\"])\n",
        "        .row([\"Small\", \"$10.00 USD\"])\n",
        "        .build()?;\n",
        "    price_brackets::generate_both(\"My Product\", &table, \"outputs\")?;\n",
    )
}
