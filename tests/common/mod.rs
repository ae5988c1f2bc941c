#![allow(dead_code)]

use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use secrecy::SecretString;

/// Run keybox against the given home directory.
pub fn keybox(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("keybox");
    cmd.env("KEYBOX_HOME", home).env("USER", "tester");
    cmd
}

/// Encrypt `material` to `passphrase` the way legacy key files do,
/// with a low scrypt work factor to keep tests fast.
pub fn seal(material: &[u8], passphrase: &str) -> String {
    let mut recipient = age::scrypt::Recipient::new(SecretString::from(passphrase.to_owned()));
    recipient.set_work_factor(10);
    let encryptor =
        age::Encryptor::with_recipients(std::iter::once(&recipient as &dyn age::Recipient))
            .unwrap();

    let mut output = Vec::new();
    let armored =
        age::armor::ArmoredWriter::wrap_output(&mut output, age::armor::Format::AsciiArmor)
            .unwrap();
    let mut writer = encryptor.wrap_output(armored).unwrap();
    writer.write_all(material).unwrap();
    writer.finish().unwrap().finish().unwrap();
    String::from_utf8(output).unwrap()
}

fn write_record(dir: &Path, name: &str, json: serde_json::Value) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(format!("{name}.json")), json.to_string()).unwrap();
}

/// Add a local key protected by `passphrase` to the legacy store.
pub fn add_legacy_local(home: &Path, name: &str, passphrase: &str) {
    write_record(
        &home.join("keys"),
        name,
        serde_json::json!({
            "name": name,
            "category": "local",
            "public_key": format!("pub-{name}"),
            "armored_secret": seal(b"private key bytes", passphrase),
        }),
    );
}

/// Add an offline or ledger reference to the legacy store.
pub fn add_legacy_reference(home: &Path, name: &str, category: &str) {
    write_record(&home.join("keys"), name, reference(name, category));
}

/// Add an offline or ledger reference to the keyring store.
pub fn add_keyring_reference(home: &Path, name: &str, category: &str) {
    write_record(&home.join("keyring"), name, reference(name, category));
}

fn reference(name: &str, category: &str) -> serde_json::Value {
    let mut value = serde_json::json!({
        "name": name,
        "category": category,
        "public_key": format!("pub-{name}"),
        "created_at": "2026-03-01T12:00:00Z",
    });
    if category == "ledger" {
        value["hd_path"] = serde_json::json!("m/44'/118'/0'/0/0");
    }
    value
}
