//! End-to-end demo: train on a small embedded corpus, evaluate on a
//! held-out split, then price one unseen flat.
//!
//! Run with: cargo run --example price_flat

use std::error::Error;

use resale_pricer::model::{LinearRegression, Regressor};
use resale_pricer::pipeline::FeaturePipeline;
use resale_pricer::predict::PricePredictor;
use resale_pricer::record::{FlatListing, TransactionRecord};
use resale_pricer::split::{train_test_split, SplitConfig};
use resale_pricer::evaluate;

const CORPUS_CSV: &str = "\
town,flat_type,block,street_name,storey_range,floor_area_sqm,flat_model,lease_commence_year,remaining_lease,sale_month,resale_price
ANG MO KIO,3 ROOM,309,ANG MO KIO AVE 1,07 TO 09,68.0,New Generation,1977,56 years 04 months,2021-03,331000
ANG MO KIO,3 ROOM,216,ANG MO KIO AVE 1,01 TO 03,68.0,New Generation,1976,54 years 11 months,2021-04,305000
ANG MO KIO,4 ROOM,443,ANG MO KIO AVE 10,04 TO 06,92.0,New Generation,1979,57 years 06 months,2021-04,428000
BEDOK,3 ROOM,123,BEDOK NORTH RD,04 TO 06,67.0,Improved,1980,58 years,2021-05,320000
BEDOK,4 ROOM,418,BEDOK NORTH AVE 2,10 TO 12,93.0,Improved,1985,63 years 02 months,2021-05,450000
BEDOK,4 ROOM,129,BEDOK NORTH ST 2,07 TO 09,92.0,Improved,1984,62 years 08 months,2021-06,441000
YISHUN,4 ROOM,115,YISHUN RING RD,01 TO 03,84.0,Model A,1988,66 years,2021-06,382000
YISHUN,4 ROOM,333,YISHUN ST 31,10 TO 12,85.0,Model A,1992,70 years 03 months,2021-07,405000
YISHUN,5 ROOM,745,YISHUN ST 72,04 TO 06,122.0,Model A,1986,64 years 01 month,2021-07,520000
ANG MO KIO,5 ROOM,590,ANG MO KIO AVE 3,13 TO 15,118.0,Improved,1980,58 years 09 months,2021-08,568000
BEDOK,5 ROOM,536,BEDOK NORTH ST 3,01 TO 03,121.0,Model A,1987,65 years 05 months,2021-08,510000
YISHUN,3 ROOM,265,YISHUN ST 22,07 TO 09,67.0,New Generation,1985,63 years,2021-09,312000
";

fn load_corpus() -> Result<Vec<TransactionRecord>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_reader(CORPUS_CSV.as_bytes());
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: TransactionRecord = row?;
        records.push(record);
    }
    Ok(records)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().init();

    let records = load_corpus()?;
    println!("corpus: {} transactions", records.len());

    // Fit the encoding pipeline, then split for evaluation.
    let (pipeline, training) = FeaturePipeline::new().fit(&records)?;
    println!("feature columns: {}", pipeline.columns().len());

    let (train, test) = train_test_split(&training, &SplitConfig::new().with_seed(42))?;
    println!("split: {} train / {} test", train.n_rows(), test.n_rows());

    let model = LinearRegression::new().fit(&train)?;
    let report = evaluate(&model, &test)?;
    println!("holdout: {report}");

    println!("strongest coefficients:");
    for (column, weight) in model.named_coefficients().into_iter().take(5) {
        println!("  {column:<30} {weight:>12.1}");
    }

    // Price a flat that is not in the corpus.
    let listing = FlatListing {
        town: "BEDOK".to_string(),
        flat_type: "4 ROOM".to_string(),
        block: "414".to_string(),
        street_name: "BEDOK NORTH AVE 2".to_string(),
        storey_range: "04 TO 06".to_string(),
        floor_area_sqm: 91.0,
        flat_model: "Improved".to_string(),
        lease_commence_year: 1984,
        remaining_lease: "62 years 03 months".to_string(),
        sale_month: "2021-09".to_string(),
    };

    let predictor = PricePredictor::new(pipeline, model)?;
    let price = predictor.predict(&listing)?;
    println!(
        "predicted price for {} {} ({}, {} sqm): ${price:.0}",
        listing.town, listing.flat_type, listing.storey_range, listing.floor_area_sqm
    );

    Ok(())
}
