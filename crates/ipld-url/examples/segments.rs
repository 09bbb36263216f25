use ipld_url::prelude::*;

fn main() -> ipld_url::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut url = IpldUrl::parse("ipld://example/foo;bar=baz/fizz/?buzz=foobar")?;
    let mut segments = url.segments();
    println!("{url} {}", serde_json::to_string(&segments).unwrap_or_default());

    segments[1].set("example", "Hello;World!");
    url.set_segments(segments);
    println!("{url} {}", serde_json::to_string(&url.segments()).unwrap_or_default());

    url.try_set_segments([
        // Special characters in the name are escaped, arrays become repeated parameters.
        serde_json::json!({"name": "escape;this", "parameters": {"whatever": [1, 2, 3]}}),
        serde_json::json!({"name": "😁"}),
    ])?;
    println!("{url} {}", serde_json::to_string(&url.segments()).unwrap_or_default());

    Ok(())
}
