use std::fs;

fn main() {
    // Reject a broken bundled config before it gets baked into the binary
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    let version = table
        .get("protocol")
        .and_then(|protocol| protocol.get("version"))
        .and_then(|version| version.as_str());
    if version.is_none_or(str::is_empty) {
        panic!("default_config.toml must set a non-empty protocol.version");
    }
}
