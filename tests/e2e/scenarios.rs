use super::harness::{TestContext, parse_json, write_file};

pub struct Scenario {
    pub name: &'static str,
    pub run: fn(&TestContext) -> Result<(), String>,
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "help_output",
            run: scenario_help,
        },
        Scenario {
            name: "stdin_blank_lines",
            run: scenario_stdin_blank_lines,
        },
        Scenario {
            name: "stdin_invalid_module_path",
            run: scenario_stdin_invalid_module_path,
        },
        Scenario {
            name: "override_plain_output",
            run: scenario_override_plain,
        },
        Scenario {
            name: "override_with_name",
            run: scenario_override_with_name,
        },
        Scenario {
            name: "override_readable_internalized",
            run: scenario_override_readable_internalized,
        },
        Scenario {
            name: "json_output",
            run: scenario_json_output,
        },
        Scenario {
            name: "quiet_suppresses_errors",
            run: scenario_quiet,
        },
        Scenario {
            name: "missing_directory",
            run: scenario_missing_directory,
        },
        Scenario {
            name: "go_not_in_path",
            run: scenario_go_not_in_path,
        },
        Scenario {
            name: "invalid_config",
            run: scenario_invalid_config,
        },
        Scenario {
            name: "stdin_with_directory_rejected",
            run: scenario_stdin_with_directory,
        },
    ]
}

const OVERRIDES: &[(&str, &str)] = &[
    ("example.com/pkg", "https://example.com/pkg.git"),
    ("github.com/owner/repo", "https://github.com/owner/repo.git"),
];

fn scenario_help(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("help")?;
    let output = ctx.run(&env, &["--help"])?;
    output.assert_success()?;
    output.assert_stdout_contains("--stdin")?;
    output.assert_stdout_contains("go-import")?;
    Ok(())
}

fn scenario_stdin_blank_lines(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("stdin-blank")?;
    let output = ctx.run_with_stdin(&env, &["--stdin"], "\n   \n")?;
    output.assert_success()?;
    output.assert_stdout_eq("")?;
    output.assert_stderr_contains("not a module")?;
    Ok(())
}

fn scenario_stdin_invalid_module_path(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("stdin-invalid")?;
    env.write_overrides(OVERRIDES)?;
    // The bad line is reported and the next line still resolves
    let output = ctx.run_with_stdin(&env, &["--stdin"], "http:// v0.1.0\nexample.com/pkg v1.2.3\n")?;
    output.assert_success()?;
    output.assert_stderr_contains("invalid module path")?;
    output.assert_stdout_eq("https://example.com/pkg.git\n")?;
    Ok(())
}

fn scenario_override_plain(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("override-plain")?;
    env.write_overrides(OVERRIDES)?;
    let output = ctx.run_with_stdin(
        &env,
        &["--stdin"],
        "example.com/pkg v1.2.3\ngithub.com/owner/repo v0.4.0\n",
    )?;
    output.assert_success()?;
    output.assert_stdout_eq("https://example.com/pkg.git\nhttps://github.com/owner/repo.git\n")?;
    Ok(())
}

fn scenario_override_with_name(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("override-name")?;
    env.write_overrides(OVERRIDES)?;
    let output = ctx.run_with_stdin(&env, &["--stdin", "-n"], "example.com/pkg v1.2.3\n")?;
    output.assert_success()?;
    output.assert_stdout_eq("https://example.com/pkg.git example.com/pkg\n")?;
    Ok(())
}

fn scenario_override_readable_internalized(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("override-internalized")?;
    env.write_overrides(OVERRIDES)?;

    let readable = ctx.run_with_stdin(&env, &["--stdin", "-n", "-r"], "example.com/pkg v1.2.3\n")?;
    readable.assert_success()?;
    readable.assert_stdout_eq("https://example.com/pkg.git => example.com/pkg\n")?;

    let internalized = ctx.run_with_stdin(
        &env,
        &["--stdin", "-n", "-z", "-p", "dep_", "-s", "_src"],
        "example.com/pkg v1.2.3\n",
    )?;
    internalized.assert_success()?;
    internalized.assert_stdout_eq("https://example.com/pkg.git dep_example_com_pkg_src\n")?;
    Ok(())
}

fn scenario_json_output(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("json")?;
    env.write_overrides(OVERRIDES)?;
    let output = ctx.run_with_stdin(
        &env,
        &["--stdin", "--json"],
        "example.com/pkg v1.2.3\n\nhttp://\ngithub.com/owner/repo\n",
    )?;
    output.assert_success()?;

    let json = parse_json(&output.stdout)?;
    let entries = json
        .as_array()
        .ok_or_else(|| format!("Expected JSON array, got: {}", output.stdout))?;
    if entries.len() != 3 {
        return Err(format!("Expected 3 entries, got: {}", output.stdout));
    }

    if entries[0]["module"] != "example.com/pkg"
        || entries[0]["version"] != "v1.2.3"
        || entries[0]["repo"] != "https://example.com/pkg.git"
    {
        return Err(format!("Unexpected first entry: {}", entries[0]));
    }
    if entries[1]["module"] != "http://" || entries[1].get("error").is_none() {
        return Err(format!("Expected error entry, got: {}", entries[1]));
    }
    if entries[2]["repo"] != "https://github.com/owner/repo.git"
        || entries[2].get("version").is_some()
    {
        return Err(format!("Unexpected third entry: {}", entries[2]));
    }
    Ok(())
}

fn scenario_quiet(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("quiet")?;
    let output = ctx.run_with_stdin(&env, &["--stdin", "-q"], "\nhttp://\n")?;
    output.assert_success()?;
    output.assert_stdout_eq("")?;
    output.assert_stderr_empty()?;
    Ok(())
}

fn scenario_missing_directory(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("missing-dir")?;
    let missing = env.root.join("no-such-module");
    let missing = missing.to_string_lossy();
    let output = ctx.run(&env, &["-C", &missing])?;
    output.assert_failure()?;
    output.assert_stderr_contains("does not exist")?;
    Ok(())
}

fn scenario_go_not_in_path(ctx: &TestContext) -> Result<(), String> {
    let mut env = ctx.create_env("no-go")?;
    let empty_bin = env.root.join("bin");
    std::fs::create_dir_all(&empty_bin).map_err(|e| format!("Failed to create bin dir: {}", e))?;
    env.path = Some(empty_bin.to_string_lossy().to_string());

    let output = ctx.run(&env, &[])?;
    output.assert_failure()?;
    output.assert_stderr_contains("unable to find `go` in PATH=")?;
    Ok(())
}

fn scenario_invalid_config(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("invalid-config")?;
    write_file(
        &env.xdg_config.join("goimportgraph").join("config.json"),
        "{ not json",
    )?;
    let output = ctx.run_with_stdin(&env, &["--stdin"], "example.com/pkg v1.2.3\n")?;
    output.assert_failure()?;
    output.assert_stderr_contains("invalid config")?;
    Ok(())
}

fn scenario_stdin_with_directory(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("stdin-directory")?;
    let root = env.root.to_string_lossy().to_string();
    let output = ctx.run(&env, &["--stdin", "-C", &root])?;
    output.assert_failure()?;
    output.assert_stderr_contains("cannot be used with")?;
    Ok(())
}
