use clap::{Args, Parser, Subcommand, ValueEnum};
use pvt_core::units::{k, pa};
use pvt_fluids::{
    Fluid, FluidPvt, PvtConstants, Quantity, SweepDefinition, SweepResult, SweepType,
    ZFactorMethod, ZFactorSolver, execute_pressure_sweep_at_temperature,
    execute_temperature_sweep_at_pressure, parse_quantity,
};
use pvt_project::{PvtProject, build_fluid, validate_project};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "pvt-cli")]
#[command(about = "Black-oil PVT properties of reservoir fluids", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate fluid properties at one point or at the project's conditions
    Eval {
        /// Fluid definition file (YAML or JSON); default black oil when absent
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Pressure with unit, e.g. "150 bar", "2000 psia", "50 barg"
        #[arg(short, long, requires = "temperature")]
        pressure: Option<String>,
        /// Temperature with unit, e.g. "80C", "180F"
        #[arg(short, long, requires = "pressure")]
        temperature: Option<String>,
        #[command(flatten)]
        overrides: FluidOverrides,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Solve the Dranchuk–Abu-Kassem z-factor at pseudo-reduced conditions
    Zfactor {
        #[arg(long)]
        ppr: f64,
        #[arg(long)]
        tpr: f64,
        #[arg(long, value_enum, default_value_t = MethodArg::Fallback)]
        method: MethodArg,
        #[arg(long)]
        json: bool,
    },
    /// Sweep pressure or temperature and tabulate fluid properties
    Sweep {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Swept variable
        #[arg(long, value_enum)]
        variable: SweepVariableArg,
        /// Start value with unit
        #[arg(long)]
        start: String,
        /// End value with unit
        #[arg(long)]
        end: String,
        /// Value of the other variable with unit
        #[arg(long)]
        fixed: String,
        #[arg(long, default_value_t = 11)]
        points: usize,
        /// Logarithmic spacing
        #[arg(long)]
        log: bool,
        #[command(flatten)]
        overrides: FluidOverrides,
        #[arg(long)]
        json: bool,
    },
    /// Validate a fluid definition file
    Validate {
        /// Path to the YAML or JSON file
        config: PathBuf,
    },
    /// Write a starter fluid definition file
    Init {
        /// Output path (.yaml or .json)
        path: PathBuf,
        #[arg(long, default_value = "Black oil")]
        name: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Adjustments applied on top of the loaded fluid definition.
#[derive(Args)]
struct FluidOverrides {
    /// Gas specific gravity, e.g. "0.75"
    #[arg(long)]
    gas_gamma: Option<String>,
    /// Water cut, e.g. "0.3" or "30%"
    #[arg(long)]
    water_cut: Option<String>,
    /// Liquid rate, e.g. "120 m3/day", "500 bbl/day"
    #[arg(long)]
    rate: Option<String>,
}

impl FluidOverrides {
    fn apply(&self, fluid: &mut Fluid) -> CliResult<()> {
        if let Some(text) = &self.gas_gamma {
            fluid.set_gas_gamma(parse_quantity(text, Quantity::Dimensionless)?)?;
        }
        if let Some(text) = &self.water_cut {
            fluid.set_fw(parse_quantity(text, Quantity::Fraction)?)?;
        }
        if let Some(text) = &self.rate {
            fluid.set_qliq_m3day(parse_quantity(text, Quantity::LiquidRate)?)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Newton,
    Bisection,
    Fallback,
}

impl From<MethodArg> for ZFactorMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Newton => ZFactorMethod::Newton,
            MethodArg::Bisection => ZFactorMethod::Bisection,
            MethodArg::Fallback => ZFactorMethod::NewtonWithBisectionFallback,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SweepVariableArg {
    Pressure,
    Temperature,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Eval {
            config,
            pressure,
            temperature,
            overrides,
            json,
        } => cmd_eval(config.as_deref(), pressure.zip(temperature), &overrides, json),
        Commands::Zfactor {
            ppr,
            tpr,
            method,
            json,
        } => cmd_zfactor(ppr, tpr, method.into(), json),
        Commands::Sweep {
            config,
            variable,
            start,
            end,
            fixed,
            points,
            log,
            overrides,
            json,
        } => {
            let spacing = if log {
                SweepType::Logarithmic
            } else {
                SweepType::Linear
            };
            cmd_sweep(
                config.as_deref(),
                variable,
                (start.as_str(), end.as_str()),
                &fixed,
                points,
                spacing,
                &overrides,
                json,
            )
        }
        Commands::Validate { config } => cmd_validate(&config),
        Commands::Init { path, name, force } => cmd_init(&path, &name, force),
    }
}

fn load_project(config: Option<&Path>) -> CliResult<PvtProject> {
    match config {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading fluid definition");
            Ok(pvt_project::load(path)?)
        }
        None => Ok(PvtProject::starter("default")),
    }
}

fn load_fluid(config: Option<&Path>) -> CliResult<Fluid> {
    match config {
        Some(_) => Ok(build_fluid(&load_project(config)?)?),
        None => Ok(Fluid::black_oil(&PvtConstants::default())?),
    }
}

fn cmd_eval(
    config: Option<&Path>,
    point: Option<(String, String)>,
    overrides: &FluidOverrides,
    json: bool,
) -> CliResult<()> {
    let project = load_project(config)?;
    let mut fluid = build_fluid(&project)?;
    overrides.apply(&mut fluid)?;

    let mut rows: Vec<(String, FluidPvt)> = Vec::new();
    match point {
        Some((p_text, t_text)) => {
            let p_pa = parse_quantity(&p_text, Quantity::Pressure)?;
            let t_k = parse_quantity(&t_text, Quantity::Temperature)?;
            rows.push((format!("{p_text} / {t_text}"), fluid.calc_pvt(pa(p_pa), k(t_k))?));
        }
        None => {
            if project.conditions.is_empty() {
                return Err("no --pressure/--temperature given and the project has no conditions".into());
            }
            for condition in &project.conditions {
                let pvt = fluid.calc_pvt(
                    pvt_core::units::bar(condition.p_bar),
                    pvt_core::units::degc(condition.t_c),
                )?;
                rows.push((condition.name.clone(), pvt));
            }
        }
    }

    if json {
        let named: Vec<_> = rows
            .iter()
            .map(|(name, pvt)| serde_json::json!({ "name": name, "pvt": pvt }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&named)?);
        return Ok(());
    }

    for (name, pvt) in &rows {
        println!("{name}");
        print_pvt(pvt);
        println!();
    }
    Ok(())
}

fn print_pvt(pvt: &FluidPvt) {
    println!("  p = {:.3} bar, T = {:.2} °C ({:?})", pvt.p_bar, pvt.t_c, pvt.region);
    println!(
        "  gas:   z = {:.5}  Ppr = {:.4}  Tpr = {:.4}  Bg = {:.6} m3/m3  mu = {:.5} cP  cg = {:.3e} 1/bar  rho = {:.3} kg/m3",
        pvt.z, pvt.p_pr, pvt.t_pr, pvt.bg_m3m3, pvt.mu_gas_cp, pvt.cg_1bar, pvt.rho_gas_kg_m3
    );
    println!(
        "  oil:   Rs = {:.3} m3/m3  Bo = {:.4} m3/m3  mu = {:.4} cP  co = {:.3e} 1/bar  rho = {:.2} kg/m3",
        pvt.rs_m3m3, pvt.bo_m3m3, pvt.mu_oil_cp, pvt.co_1bar, pvt.rho_oil_kg_m3
    );
    println!(
        "  water: Bw = {:.4} m3/m3  mu = {:.4} cP  rho = {:.2} kg/m3",
        pvt.bw_m3m3, pvt.mu_water_cp, pvt.rho_water_kg_m3
    );
    println!("  fw = {:.3}, qliq = {:.3} m3/day", pvt.fw, pvt.qliq_m3day);
}

fn cmd_zfactor(ppr: f64, tpr: f64, method: ZFactorMethod, json: bool) -> CliResult<()> {
    let solution = ZFactorSolver::new(method).solve(ppr, tpr)?;

    if json {
        let value = serde_json::json!({
            "ppr": ppr,
            "tpr": tpr,
            "z": solution.z,
            "iterations": solution.iterations,
            "method": solution.method,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!(
            "z = {:.6} ({:?}, {} iterations)",
            solution.z, solution.method, solution.iterations
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_sweep(
    config: Option<&Path>,
    variable: SweepVariableArg,
    (start, end): (&str, &str),
    fixed: &str,
    points: usize,
    spacing: SweepType,
    overrides: &FluidOverrides,
    json: bool,
) -> CliResult<()> {
    let mut fluid = load_fluid(config)?;
    overrides.apply(&mut fluid)?;

    let result: SweepResult = match variable {
        SweepVariableArg::Pressure => {
            let sweep =
                SweepDefinition::from_text(start, end, Quantity::Pressure, points, spacing)?;
            let t_k = parse_quantity(fixed, Quantity::Temperature)?;
            execute_pressure_sweep_at_temperature(&fluid, &sweep, t_k)?
        }
        SweepVariableArg::Temperature => {
            let sweep =
                SweepDefinition::from_text(start, end, Quantity::Temperature, points, spacing)?;
            let p_pa = parse_quantity(fixed, Quantity::Pressure)?;
            execute_temperature_sweep_at_pressure(&fluid, &sweep, p_pa)?
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{:>10} {:>8} {:>9} {:>10} {:>9} {:>9} {:>9} {:>9}",
        "p [bar]", "T [C]", "z", "Bg", "Rs", "Bo", "mu_o", "rho_o"
    );
    for point in result.points.iter() {
        match point {
            Some(pvt) => println!(
                "{:>10.3} {:>8.2} {:>9.5} {:>10.6} {:>9.3} {:>9.4} {:>9.4} {:>9.2}",
                pvt.p_bar,
                pvt.t_c,
                pvt.z,
                pvt.bg_m3m3,
                pvt.rs_m3m3,
                pvt.bo_m3m3,
                pvt.mu_oil_cp,
                pvt.rho_oil_kg_m3
            ),
            None => println!("{:>10}", "failed"),
        }
    }
    if result.num_failed > 0 {
        println!("{} of {} points failed", result.num_failed, result.points.len());
    }
    Ok(())
}

fn cmd_validate(config: &Path) -> CliResult<()> {
    println!("Validating fluid definition: {}", config.display());
    let project = pvt_project::load(config)?;
    validate_project(&project)?;
    build_fluid(&project)?;
    println!("✓ Fluid definition is valid");
    Ok(())
}

fn cmd_init(path: &Path, name: &str, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(format!("{} already exists (use --force to overwrite)", path.display()).into());
    }

    let project = PvtProject::starter(name);
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        pvt_project::save_json(path, &project)?;
    } else {
        pvt_project::save_yaml(path, &project)?;
    }
    println!("✓ Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pvt_fluids::PvtComponent;

    fn eval_overrides(args: &[&str]) -> FluidOverrides {
        let mut argv = vec!["pvt-cli", "eval"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Eval { overrides, .. } => overrides,
            _ => unreachable!(),
        }
    }

    #[test]
    fn overrides_use_unit_parsers() {
        let overrides = eval_overrides(&[
            "--gas-gamma",
            "0.75",
            "--water-cut",
            "30%",
            "--rate",
            "2 m3/h",
        ]);
        let mut fluid = Fluid::black_oil(&PvtConstants::default()).unwrap();
        overrides.apply(&mut fluid).unwrap();

        assert_eq!(fluid.oil().gas().gamma(), 0.75);
        assert!((fluid.fw() - 0.3).abs() < 1e-12);
        assert_eq!(fluid.qliq_m3day(), 48.0);
    }

    #[test]
    fn out_of_range_water_cut_is_rejected() {
        let overrides = eval_overrides(&["--water-cut", "120%"]);
        let mut fluid = Fluid::black_oil(&PvtConstants::default()).unwrap();
        assert!(overrides.apply(&mut fluid).is_err());
        assert_eq!(fluid.fw(), 0.0);
    }

    #[test]
    fn gauge_pressure_is_read_from_unit_tag() {
        let absolute = parse_quantity("51.01325 bar", Quantity::Pressure).unwrap();
        let gauge = parse_quantity("50 barg", Quantity::Pressure).unwrap();
        assert!((absolute - gauge).abs() < 1e-6);
    }
}
