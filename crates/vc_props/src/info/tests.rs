use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::derive::Inspect;
use crate::dynamic::DynamicShape;
use crate::info::{DescriptorShape, PropertyDescriptor, Typed};
use crate::{
    AccessError, AccessOptions, ShapeKind, ShapeRef, Value, enumerate_properties, get_property,
    set_property,
};

#[derive(Inspect, Default)]
struct Settings {
    #[inspect(rename = "Volume")]
    volume: u8,
    #[inspect(read_only)]
    version: u32,
    #[inspect(write_only)]
    password: String,
    #[inspect(skip)]
    scratch: Vec<u8>,
    r#type: bool,
}

#[test]
fn field_attributes_shape_the_table() {
    let table = <Settings as Typed>::property_table();
    assert_eq!(
        table.names().collect::<Vec<_>>(),
        ["Volume", "version", "password", "type"]
    );

    let version = table.get(1).unwrap();
    assert!(version.is_readable() && !version.is_writable());
    let password = table.get(2).unwrap();
    assert!(!password.is_readable() && password.is_writable());

    let mut settings = Settings::default();
    set_property(&mut settings, "password", Value::new(String::from("hunter2")), AccessOptions::STRICT)
        .unwrap();
    assert_eq!(settings.password, "hunter2");

    let err = get_property(&settings, "password", AccessOptions::STRICT).unwrap_err();
    assert!(matches!(err, AccessError::InaccessibleProperty { .. }));
    assert!(get_property(&settings, "scratch", AccessOptions::STRICT).unwrap_err().is_not_found());
    assert!(settings.scratch.is_empty());
}

#[derive(Inspect)]
struct Wrapper<T> {
    inner: T,
}

#[test]
fn generic_types_get_one_table_per_instantiation() {
    let a = <Wrapper<u8> as Typed>::property_table();
    let b = <Wrapper<String> as Typed>::property_table();
    assert!(a.type_is::<Wrapper<u8>>());
    assert!(b.type_is::<Wrapper<String>>());

    let wrapped = Wrapper {
        inner: String::from("x"),
    };
    let value = get_property(&wrapped, "inner", AccessOptions::STRICT).unwrap().unwrap();
    assert_eq!(value.downcast_ref::<String>().unwrap(), "x");
}

#[derive(Inspect)]
#[inspect(opaque)]
enum Mode {
    _On,
    _Off,
}

#[derive(Inspect)]
struct Marker;

#[test]
fn opaque_and_unit_types_have_empty_tables() {
    assert!(<Mode as Typed>::property_table().is_empty());
    assert!(<Marker as Typed>::property_table().is_empty());
    assert_eq!(enumerate_properties(&Marker).unwrap().count(), 0);
}

/// Exposes `Count` statically and dynamically; only the dynamic read bumps
/// the counter.
#[derive(Inspect)]
#[inspect(dynamic)]
struct Gauge {
    #[inspect(rename = "Count")]
    count: u32,
    #[inspect(skip)]
    dynamic_reads: Cell<u32>,
}

impl DynamicShape for Gauge {
    fn member_names(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed("Count")]
    }

    fn invoke_get(&self, name: &str) -> Result<Option<Value>, AccessError> {
        if name != "Count" {
            return Ok(None);
        }
        self.dynamic_reads.set(self.dynamic_reads.get() + 1);
        Ok(Some(Value::new(self.count + 100)))
    }
}

#[test]
fn dynamic_attribute_takes_precedence_over_fields() {
    let gauge = Gauge {
        count: 1,
        dynamic_reads: Cell::new(0),
    };
    assert_eq!(ShapeRef::of(&gauge).kind(), ShapeKind::Dynamic);

    let value = get_property(&gauge, "Count", AccessOptions::STRICT).unwrap().unwrap();
    assert_eq!(value.downcast_ref::<u32>(), Some(&101));
    assert_eq!(gauge.dynamic_reads.get(), 1);

    let names: Vec<_> = enumerate_properties(&gauge)
        .unwrap()
        .map(|pair| pair.unwrap().name.into_owned())
        .collect();
    assert_eq!(names, ["Count"]);
    assert_eq!(gauge.dynamic_reads.get(), 2);
}

#[derive(Inspect)]
#[inspect(descriptor)]
struct Sheet {
    #[inspect(rename = "Title")]
    title: String,
}

impl DescriptorShape for Sheet {
    fn property_descriptors(&self) -> Vec<PropertyDescriptor> {
        vec![PropertyDescriptor::new("Caption").with_getter(|sheet: &Sheet| Ok(Value::new(sheet.title.clone())))]
    }
}

#[test]
fn descriptor_attribute_replaces_the_table() {
    let sheet = Sheet {
        title: String::from("Q3"),
    };
    assert_eq!(ShapeRef::of(&sheet).kind(), ShapeKind::Descriptor);
    assert!(get_property(&sheet, "Caption", AccessOptions::STRICT).unwrap().is_some());
    assert!(get_property(&sheet, "Title", AccessOptions::STRICT).unwrap_err().is_not_found());
}
