use panthyr_credentials::{CredentialsStore, ErrorKind, StoreConfig};
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

fn store_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("credentials")
}

#[test]
fn get_all_returns_exactly_the_file_entries() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);
    fs::write(
        &path,
        "# station 3\n[credentials]\nemail_user = alice\nemail_password = secret\nftp_server = ftp.example.org\n",
    )
    .unwrap();

    let store = CredentialsStore::at(&path).unwrap();
    let expected: BTreeMap<String, String> = [
        ("email_user", "alice"),
        ("email_password", "secret"),
        ("ftp_server", "ftp.example.org"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(store.get_all(), &expected);
}

#[test]
fn unknown_name_is_absent_not_an_error() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);
    fs::write(&path, "[credentials]\nftp_user = bob\n").unwrap();

    let store = CredentialsStore::at(&path).unwrap();
    assert_eq!(store.get_credential("email_user"), None);
}

#[test]
fn template_parses_to_empty_values() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);

    let store = CredentialsStore::at(&path).unwrap();
    store.create_empty().unwrap();

    let store = CredentialsStore::at(&path).unwrap();
    let keys: Vec<&str> = store.get_all().keys().map(String::as_str).collect();
    let mut expected = vec![
        "email_user",
        "email_password",
        "email_server_port",
        "ftp_server",
        "ftp_user",
        "ftp_password",
    ];
    expected.sort();
    assert_eq!(keys, expected);
    assert!(store.get_all().values().all(|v| v.is_empty()));
}

#[test]
fn create_empty_on_existing_file_leaves_it_untouched() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);
    let original = "[credentials]\nftp_user = bob\n";
    fs::write(&path, original).unwrap();

    let store = CredentialsStore::at(&path).unwrap();
    let err = store.create_empty().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn file_without_credentials_header_is_invalid() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);
    fs::write(&path, "email_user = alice\nftp_user = bob\n").unwrap();

    let err = CredentialsStore::at(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
}

#[test]
fn parse_of_missing_path_is_not_found() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::at(store_path(&dir)).with_scaffold_on_missing(false);

    let mut store = CredentialsStore::open(config).unwrap();
    let err = store.parse().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn filled_template_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);
    CredentialsStore::at(&path).unwrap().create_empty().unwrap();

    let template = fs::read_to_string(&path).unwrap();
    let filled = template
        .replace("email_user = ", "email_user = alice")
        .replace("email_server_port = ", "email_server_port = 587")
        .replace("ftp_password = ", "ftp_password = p@ss:w=rd");
    fs::write(&path, filled).unwrap();

    let mut store = CredentialsStore::at(&path).unwrap();
    store.parse().unwrap();
    assert_eq!(store.get_credential("email_user"), Some("alice"));
    assert_eq!(store.get_credential("email_server_port"), Some("587"));
    assert_eq!(store.get_credential("ftp_password"), Some("p@ss:w=rd"));
    assert_eq!(store.get_credential("ftp_user"), Some(""));
    assert_eq!(store.len(), 6);
}

#[test]
fn hypermaq_deployment_with_camera_keys() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);
    let toml = format!(
        "[store]\nprofile = \"hypermaq\"\npath = {:?}\nextra_keys = [\"camera_user\", \"camera_password\"]\n",
        path.display().to_string()
    );
    let config = StoreConfig::from_toml_str(&toml).unwrap();

    let mut store = CredentialsStore::open(config).unwrap();
    assert_eq!(store.parse().unwrap_err().kind(), ErrorKind::NotFound);

    store.parse().unwrap();
    assert_eq!(store.len(), 8);
    assert_eq!(store.unfilled_keys().len(), 8);
    assert_eq!(store.get_credential("camera_user"), Some(""));
}
