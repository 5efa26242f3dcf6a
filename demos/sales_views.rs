/// Sales Views Example
///
/// This example demonstrates:
/// - Wrapping CSV data in a DataFrameView
/// - Selecting rows by exact value and by range
/// - Applying named frame operations
/// - Splitting a view into a layout and a map
/// - Converting a view into bar and heatmap elements
///
/// Run with `RUST_LOG=debug` to see the conversion log.

use frameview::{
    ConvertOptions, DataFrameView, Dimension, GroupKey, Reducer, Selector, TableConverter,
    ViewOptions,
};
use serde_json::json;

const SALES: &str = "\
year,month,region,product,units,revenue
2023,1,north,widget,12,240.0
2023,1,south,widget,7,140.0
2023,2,north,gadget,3,150.0
2023,2,south,widget,9,180.0
2024,1,north,gadget,5,250.0
2024,1,south,gadget,4,200.0
2024,2,north,widget,15,300.0
2024,2,south,widget,,0.0
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== FrameView Sales Example ===\n");

    // 1. Wrap the data
    println!("1. Loading sales data...");
    let frame = frameview::DataFrame::from_csv(SALES)?;
    let view = DataFrameView::with_dimensions(
        frame,
        Some(vec![
            Dimension::new("year"),
            Dimension::new("month"),
            Dimension::new("region"),
            Dimension::new("product"),
            Dimension::with_unit("units", "pcs"),
            Dimension::with_unit("revenue", "USD"),
        ]),
        ViewOptions::new().x("month").y("revenue").value("Sales"),
    )?;
    println!("   {} rows over dimensions {:?}", view.len(), view.dimension_names());
    println!("   xlim = {:?}, ylim = {:?}\n", view.xlim()?, view.ylim()?);

    // 2. Selection
    println!("2. Selecting...");
    let north = view.select(&[("region", "north".into())])?;
    println!("   north rows: {}", north.len());
    let mid_revenue = view.select(&[("revenue", Selector::range(100.0, 250.0))])?;
    println!("   revenue in (100, 250): {}", mid_revenue.len());
    let jan_2024 = view.index(&[2024.into(), 1.into()])?;
    println!("   2024/01 rows: {}\n", jan_2024.len());

    // 3. Frame operations
    println!("3. Applying operations...");
    let cleaned = view.apply("dropna", &[])?;
    let top = cleaned.apply("sort_values", &[json!("revenue"), json!(false)])?.apply("head", &[json!(3)])?;
    println!("   top revenue: {:?}\n", top.dimension_values("revenue")?);

    // 4. Containers
    println!("4. Splitting...");
    let layout = cleaned.layout(&["region"], 2)?;
    for (key, panel) in layout.iter() {
        println!("   panel {}: {} rows", key, panel.len());
    }
    let by_year = cleaned.viewmap(&["year"])?;
    println!("   viewmap frames: {}\n", by_year.len());

    // 5. Conversion
    println!("5. Converting...");
    let bars = cleaned
        .bars(ConvertOptions::new(["units"], ["region"]).reduce(Reducer::sum()))?
        .into_element()
        .ok_or("expected a single element")?;
    for (key, values) in bars.table().rows() {
        println!("   {} -> {:?}", key, values);
    }

    let heatmaps = cleaned
        .heatmap(
            ConvertOptions::new(["revenue"], ["month", "region"])
                .map_dims(["year"])
                .reduce(Reducer::mean())
                .option("cmap", json!("viridis")),
        )?
        .into_map()
        .ok_or("expected an element map")?;
    if let Some(y2024) = heatmaps.get(&GroupKey::from(vec![2024])) {
        println!("\n   2024 heatmap:\n{}", y2024.to_json()?);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
