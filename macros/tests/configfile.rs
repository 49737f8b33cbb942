use serde::Deserialize;

use lookup_common::{ConfigFile, Versioned};
use lookup_macros::into_configfile;

#[into_configfile(version = 3, filename = "foo.hcl")]
#[derive(Debug, Default, Deserialize)]
struct Foo {
    name: String,
}

#[into_configfile(filename = "bar.hcl")]
#[derive(Debug, Default, Deserialize)]
struct Bar {}

#[test]
fn test_added_items() {
    let f = Foo::default();
    assert_eq!(0, f.version());
    assert_eq!(3, Foo::VERSION);
    assert_eq!("foo.hcl", Foo::FILENAME);
}

#[test]
fn test_default_version() {
    assert_eq!(1, Bar::VERSION);
    assert_eq!("bar.hcl", Bar::FILENAME);
}

#[test]
fn test_version_checked() {
    let f = ConfigFile::<Foo>::parse("version = 3\nname = \"bar\"\n").unwrap();
    assert_eq!("bar", f.name);
    assert_eq!(3, f.version());

    assert!(ConfigFile::<Foo>::parse("version = 1\nname = \"bar\"\n").is_err());
}
