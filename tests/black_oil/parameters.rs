use super::{load_parameters, PARAMETER_FILE};
use poroflash::black_oil::{BlackOilParameters, SurfaceDensity};
use poroflash::parameter::{Parameter, ParameterError};

#[test]
fn regions_in_query_order() {
    let parameters = load_parameters(vec!["aquifer", "spe1"]).unwrap();
    let names: Vec<&str> = parameters.records().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["aquifer", "spe1"]);
    assert!(parameters.regions[0].oil.is_none());
    assert!(parameters.regions[1].gas.is_some());
    assert_eq!(parameters.regions[1].density.water, 64.79);
}

#[test]
fn missing_region() {
    let err = BlackOilParameters::from_json(vec!["spe1", "spe9"], PARAMETER_FILE)
        .err()
        .unwrap();
    assert!(matches!(err, ParameterError::RegionsNotFound(ref s) if s.contains("spe9")));
}

#[test]
fn default_surface_densities() {
    let parameters = load_parameters(vec!["dead gas cap"]).unwrap();
    assert_eq!(parameters.regions[0].density, SurfaceDensity::default());
    assert!(parameters.regions[0].gas.is_none());
}

#[test]
fn subset_of_regions() {
    let parameters = load_parameters(vec!["spe1", "dead gas cap", "aquifer"]).unwrap();
    let subset = parameters.subset(&[2, 0]).unwrap();
    assert_eq!(subset.records()[0].name, "aquifer");
    assert_eq!(subset.regions.len(), 2);
    assert!(subset.to_string().contains("pvco: 10 row(s)"));
    let err = parameters.subset(&[0, 3]).err().unwrap();
    assert!(matches!(err, ParameterError::RegionsNotFound(ref s) if s.contains("region 3")));
}

