use geohash_rs::{GeohashCell, GeohashError, decode, distance, encode, neighbors};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), GeohashError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let lat = 37.8324;
    let lng = 112.5584;

    let hash = encode(lat, lng, 12);
    println!("Geohash: {}", hash);

    let (decoded_lat, decoded_lng) = decode(&hash)?;
    println!("Decoded: ({}, {})", decoded_lat, decoded_lng);

    let cell = GeohashCell::from_hash(&hash)?;
    println!("Error: +/-{} lat, +/-{} lng", cell.lat_error, cell.lng_error);
    println!("Polygon: {:?}", cell.to_polygon());

    let around = neighbors(&hash)?;
    let json =
        serde_json::to_string_pretty(&around).map_err(|e| GeohashError::IoError(e.to_string()))?;
    println!("Neighbors: {}", json);

    println!("Distance to Beijing: {} m", distance(lat, lng, 39.9042, 116.4074));

    Ok(())
}
