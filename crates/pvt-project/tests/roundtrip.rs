use pvt_fluids::{
    FluidError, GasCorrelation, OilCorrelation, PvtComponent, ZFactorMethod,
};
use pvt_project::schema::*;
use pvt_project::{
    ProjectError, build_fluid, load, load_json, load_yaml, save_json, save_yaml, validate_project,
};

fn temp_path(file: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(file)
}

#[test]
fn roundtrip_yaml_starter_project() {
    let project = PvtProject::starter("Starter");
    validate_project(&project).unwrap();

    let path = temp_path("pvt_project_roundtrip_starter.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json_custom_fluid() {
    let mut project = PvtProject::starter("Heavy gas");
    project.fluid.gas = GasDef {
        gamma: Some(0.95),
        correlation: GasCorrelation::DranchukAbuKassem {
            method: ZFactorMethod::Bisection,
        },
    };
    project.fluid.oil.gamma = Some(0.9);
    project.fluid.oil.calibration.pb_bar = 180.0;
    project.fluid.water_cut = 0.4;
    project.constants.tsc_c = 20.0;

    let path = temp_path("pvt_project_roundtrip_custom.json");
    save_json(&path, &project).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn minimal_yaml_takes_defaults() {
    let yaml = r#"
version: 1
name: Minimal
fluid:
  gas:
    correlation:
      type: ConstantZ
"#;
    let path = temp_path("pvt_project_minimal.yaml");
    std::fs::write(&path, yaml).unwrap();
    let project = load_yaml(&path).unwrap();

    assert_eq!(project.fluid.gas.correlation, GasCorrelation::ConstantZ);
    assert_eq!(project.fluid.liquid_rate_m3day, 10.0);
    assert_eq!(project.fluid.oil.calibration.pb_bar, 100.0);
    assert!(project.conditions.is_empty());

    let fluid = build_fluid(&project).unwrap();
    assert_eq!(fluid.oil().gas().z(), project.constants.z_default);
}

#[test]
fn build_fluid_applies_overrides() {
    let mut project = PvtProject::starter("Overrides");
    project.fluid.gas.gamma = Some(0.75);
    project.fluid.oil.gamma = Some(0.88);
    project.fluid.water.gamma = Some(1.03);
    project.fluid.water_cut = 0.25;
    project.fluid.liquid_rate_m3day = 120.0;

    let fluid = build_fluid(&project).unwrap();
    assert_eq!(fluid.oil().gas().gamma(), 0.75);
    assert_eq!(fluid.oil().gamma(), 0.88);
    assert_eq!(fluid.water().gamma(), 1.03);
    assert_eq!(fluid.fw(), 0.25);
    assert_eq!(fluid.qliq_m3day(), 120.0);
}

#[test]
fn load_rejects_invalid_file() {
    let mut project = PvtProject::starter("Invalid");
    project.fluid.water_cut = 2.0;
    let path = temp_path("pvt_project_invalid.json");
    std::fs::write(&path, serde_json::to_string(&project).unwrap()).unwrap();

    assert!(matches!(load_json(&path), Err(ProjectError::Validation(_))));
}

#[test]
fn building_standing_oil_reports_unimplemented() {
    let mut project = PvtProject::starter("Standing");
    project.fluid.oil.correlation = OilCorrelation::Standing;

    assert!(matches!(
        build_fluid(&project),
        Err(ProjectError::Fluid(FluidError::UnimplementedCorrelation { .. }))
    ));
}
