use std::io::Write;

use super::*;

fn profile(name: &str) -> SearchProfile {
    SearchProfile {
        name: name.to_string(),
        location: "Denver, CO".to_string(),
        radius_miles: 2.0,
        place_types: vec!["cafe".to_string()],
        extract_emails: false,
        skip_details: false,
        output: None,
    }
}

#[test]
fn slug_simple_name() {
    assert_eq!(profile("Denver Cafes").slug(), "denver-cafes");
}

#[test]
fn slug_strips_punctuation() {
    assert_eq!(profile("Joe's  Gas_Stations!").slug(), "joes-gas-stations");
}

#[test]
fn find_matches_name_or_slug() {
    let file = ProfilesFile {
        searches: vec![profile("Denver Cafes")],
    };
    assert!(file.find("denver cafes").is_some());
    assert!(file.find("denver-cafes").is_some());
    assert!(file.find("boulder-cafes").is_none());
}

#[test]
fn validate_rejects_empty_name() {
    let file = ProfilesFile {
        searches: vec![profile("  ")],
    };
    let err = validate_profiles(&file).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn validate_rejects_non_positive_radius() {
    let mut p = profile("Cafes");
    p.radius_miles = 0.0;
    let file = ProfilesFile { searches: vec![p] };
    let err = validate_profiles(&file).unwrap_err();
    assert!(err.to_string().contains("invalid radius 0"));
}

#[test]
fn validate_rejects_missing_place_types() {
    let mut p = profile("Cafes");
    p.place_types = vec![String::new()];
    let file = ProfilesFile { searches: vec![p] };
    let err = validate_profiles(&file).unwrap_err();
    assert!(err.to_string().contains("at least one place type"));
}

#[test]
fn validate_rejects_duplicate_slugs() {
    let file = ProfilesFile {
        searches: vec![profile("Denver Cafes"), profile("denver-cafes")],
    };
    let err = validate_profiles(&file).unwrap_err();
    assert!(err.to_string().contains("duplicate search name"));
}

#[test]
fn load_profiles_reads_yaml() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"
searches:
  - name: denver-cafes
    location: "Denver, CO"
    radius_miles: 2
    place_types: [cafe, bakery]
    extract_emails: true
    output: cafes.xlsx
  - name: boulder gas
    location: Boulder
    radius_miles: 5.5
    place_types: [gas]
"#
    )
    .expect("write yaml");

    let profiles = load_profiles(file.path()).expect("valid profiles file");

    assert_eq!(profiles.searches.len(), 2);
    let cafes = profiles.find("denver-cafes").expect("cafes profile");
    assert!(cafes.extract_emails);
    assert_eq!(cafes.place_types, vec!["cafe", "bakery"]);
    assert_eq!(cafes.output.as_deref(), Some(Path::new("cafes.xlsx")));
    let gas = profiles.find("boulder-gas").expect("gas profile");
    assert!(!gas.extract_emails);
    assert!(gas.output.is_none());
}

#[test]
fn load_profiles_missing_file_is_io_error() {
    let result = load_profiles(Path::new("/nonexistent/placescout/searches.yaml"));
    assert!(
        matches!(result, Err(ConfigError::ProfilesFileIo { .. })),
        "expected ProfilesFileIo, got: {result:?}"
    );
}

#[test]
fn load_profiles_bad_yaml_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "searches: [this is: not valid").expect("write yaml");
    let result = load_profiles(file.path());
    assert!(
        matches!(result, Err(ConfigError::ProfilesFileParse(_))),
        "expected ProfilesFileParse, got: {result:?}"
    );
}
