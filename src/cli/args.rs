//! CLI argument parsing

#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub validate_only: bool,
    pub output_dir: String,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self {
            validate_only: false,
            output_dir: ".".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlanMoveArgs {
    pub root: Option<String>,
    pub prefixes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EchoServerArgs {
    pub port: u16,
}

impl Default for EchoServerArgs {
    fn default() -> Self {
        Self { port: 8000 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateExpectationsArgs {
    pub expectations: String,
    pub bot_data: String,
    pub builders: Vec<String>,
}

/// Parse arguments for the generator binary
pub fn parse_generate_args(args: &[String]) -> Result<GenerateArgs, String> {
    let mut parsed = GenerateArgs::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--validate-only" => {
                parsed.validate_only = true;
            }
            "--output-dir" => {
                i += 1;
                if i >= args.len() {
                    return Err("--output-dir requires a directory path".to_string());
                }
                parsed.output_dir.clone_from(&args[i]);
            }
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    Ok(parsed)
}

/// Parse arguments for the rename planner binary
pub fn parse_plan_move_args(args: &[String]) -> Result<PlanMoveArgs, String> {
    let mut parsed = PlanMoveArgs::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--root" => {
                i += 1;
                if i >= args.len() {
                    return Err("--root requires a directory path".to_string());
                }
                parsed.root = Some(args[i].clone());
            }
            arg if !arg.starts_with("--") => {
                parsed.prefixes.push(arg.to_string());
            }
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    Ok(parsed)
}

/// Parse arguments for the echo server binary
pub fn parse_echo_server_args(args: &[String]) -> Result<EchoServerArgs, String> {
    let mut parsed = EchoServerArgs::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--port" => {
                i += 1;
                if i >= args.len() {
                    return Err("--port requires a value".to_string());
                }
                parsed.port = args[i]
                    .parse()
                    .map_err(|_| "--port must be a number".to_string())?;
            }
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    Ok(parsed)
}

/// Parse arguments for the expectations updater binary
pub fn parse_update_expectations_args(args: &[String]) -> Result<UpdateExpectationsArgs, String> {
    let mut parsed = UpdateExpectationsArgs::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--expectations" => {
                i += 1;
                if i >= args.len() {
                    return Err("--expectations requires a file path".to_string());
                }
                parsed.expectations.clone_from(&args[i]);
            }
            "--bot-data" => {
                i += 1;
                if i >= args.len() {
                    return Err("--bot-data requires a file path".to_string());
                }
                parsed.bot_data.clone_from(&args[i]);
            }
            arg if !arg.starts_with("--") => {
                parsed.builders.push(arg.to_string());
            }
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    if parsed.expectations.is_empty() {
        return Err("Missing required argument: --expectations".to_string());
    }
    if parsed.bot_data.is_empty() {
        return Err("Missing required argument: --bot-data".to_string());
    }
    if parsed.builders.is_empty() {
        return Err("Missing required argument: BUILDER".to_string());
    }

    Ok(parsed)
}
