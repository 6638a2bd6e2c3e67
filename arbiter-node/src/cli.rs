pub struct Args {
    pub config_path: String,
    pub keypair_path: Option<String>,
}

impl Args {
    pub fn parse() -> Self {
        let args: Vec<String> = std::env::args().collect();

        // Provide defaults here, but allow overrides
        Self {
            config_path: get_arg_value(&args, "--config").unwrap_or("config.json").to_string(),
            keypair_path: get_arg_value(&args, "--keypair").map(|s| s.to_string()),
        }
    }
}

fn get_arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == key)
        .and_then(|pos| args.get(pos + 1))
        .map(|s| s.as_str())
}
