use core::fmt::Debug;

use cm_mapper::{BeanMapper, Format, MapperConfig, MapperError, Poly, Subtype, SubtypeRegistry};
use serde::{Deserialize, Serialize};

trait Shape: Subtype + Debug {
    fn area(&self) -> f64;
}

cm_mapper::poly_base!(dyn Shape);

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Circle {
    radius: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Rect {
    width: f64,
    height: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Triangle {
    base: f64,
    height: f64,
}

impl Shape for Circle {
    fn area(&self) -> f64 {
        core::f64::consts::PI * self.radius * self.radius
    }
}

impl Shape for Rect {
    fn area(&self) -> f64 {
        self.width * self.height
    }
}

impl Shape for Triangle {
    fn area(&self) -> f64 {
        self.base * self.height / 2.0
    }
}

cm_mapper::subtype!(dyn Shape => Circle as "circle");
cm_mapper::subtype!(dyn Shape => Rect as "rect");
cm_mapper::impl_subtype!(dyn Shape => Triangle);

fn more_shapes(registry: &mut SubtypeRegistry) {
    registry.register_subtype::<dyn Shape, Triangle>("triangle");
}

cm_mapper::subtype_provider!("more-shapes", more_shapes);

#[derive(Serialize, Deserialize, Debug)]
struct Drawing {
    title: String,
    shapes: Vec<Poly<dyn Shape>>,
}

#[derive(Serialize, Deserialize, Debug)]
struct Framed {
    label: String,
    shape: Poly<dyn Shape>,
}

fn drawing() -> Drawing {
    Drawing {
        title: String::from("plan"),
        shapes: vec![
            Poly::new(Box::new(Circle { radius: 1.5 })),
            Poly::new(Box::new(Rect {
                width: 2.0,
                height: 3.0,
            })),
        ],
    }
}

#[test]
fn tagged_json() {
    let mapper = BeanMapper::with_config(MapperConfig::new().with_indent(0));
    let text = mapper.write(&drawing(), Format::Json).unwrap();
    assert_eq!(
        text,
        r#"{"title":"plan","shapes":[{"circle":{"radius":1.5}},{"rect":{"width":2.0,"height":3.0}}]}"#
    );

    let back: Drawing = mapper.read(&text, Format::Json).unwrap();
    assert_eq!(back.shapes[0].downcast_ref::<Circle>(), Some(&Circle { radius: 1.5 }));
    assert_eq!(back.shapes[1].area(), 6.0);
    assert!(back.shapes[1].downcast_ref::<Circle>().is_none());
}

#[test]
fn yaml_and_xml() {
    let mapper = BeanMapper::new();

    let yaml = mapper.write(&drawing(), Format::Yaml).unwrap();
    let back: Drawing = mapper.read(&yaml, Format::Yaml).unwrap();
    assert_eq!(back.shapes.len(), 2);
    assert_eq!(
        back.shapes[1].downcast_ref::<Rect>(),
        Some(&Rect {
            width: 2.0,
            height: 3.0
        })
    );

    let framed = Framed {
        label: String::from("hero"),
        shape: Poly::new(Box::new(Circle { radius: 0.5 })),
    };
    let xml = mapper.write(&framed, Format::Xml).unwrap();
    assert!(xml.contains("<circle>"), "{xml}");
    let back: Framed = mapper.read(&xml, Format::Xml).unwrap();
    assert_eq!(back.shape.downcast_ref::<Circle>(), Some(&Circle { radius: 0.5 }));
}

#[test]
fn providers_extend_submitted_entries() {
    let mapper = BeanMapper::new();
    let names: Vec<_> = mapper.subtypes().subtypes_of::<dyn Shape>().map(|e| e.name()).collect();
    assert_eq!(names, ["circle", "rect", "triangle"]);

    let back: Framed = mapper
        .read(r#"{"label":"t","shape":{"triangle":{"base":4.0,"height":3.0}}}"#, Format::Json)
        .unwrap();
    assert_eq!(back.shape.area(), 6.0);
}

#[test]
fn explicit_registration_only() {
    let mapper = BeanMapper::builder().subtype::<dyn Shape, Circle>("round").build();
    assert_eq!(mapper.subtypes().len(), 1);

    let framed = Framed {
        label: String::from("a"),
        shape: Poly::new(Box::new(Circle { radius: 1.0 })),
    };
    let text = mapper.write(&framed, Format::Json).unwrap();
    assert!(text.contains("\"round\""), "{text}");

    match mapper.read::<Framed>(r#"{"label":"a","shape":{"circle":{"radius":1.0}}}"#, Format::Json) {
        Err(MapperError::UnknownSubtype { name, base }) => {
            assert_eq!(name, "circle");
            assert!(base.contains("Shape"), "{base}");
        }
        other => panic!("unexpected {other:?}"),
    }

    let rect = Framed {
        label: String::from("b"),
        shape: Poly::new(Box::new(Rect {
            width: 1.0,
            height: 1.0,
        })),
    };
    match mapper.write(&rect, Format::Yaml) {
        Err(MapperError::UnregisteredSubtype { type_path, .. }) => assert!(type_path.ends_with("Rect")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn scan_predicates() {
    let mapper = BeanMapper::builder().scan(|entry| entry.name() == "rect").build();
    let names: Vec<_> = mapper.subtypes().subtypes_of::<dyn Shape>().map(|e| e.name()).collect();
    assert_eq!(names, ["rect"]);

    let mapper = BeanMapper::builder().providers(true).build();
    let names: Vec<_> = mapper.subtypes().subtypes_of::<dyn Shape>().map(|e| e.name()).collect();
    assert_eq!(names, ["triangle"]);
}

#[test]
fn unknown_properties_inside_subtypes() {
    let mapper = BeanMapper::new();
    let text = r#"{"title":"x","shapes":[{"circle":{"radius":1.0,"fill":"red"}}]}"#;
    match mapper.read::<Drawing>(text, Format::Json) {
        Err(MapperError::UnknownProperties { paths, .. }) => assert_eq!(paths, ["shapes[0].circle.fill"]),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn malformed_tags() {
    let mapper = BeanMapper::new();
    let two = r#"{"label":"a","shape":{"circle":{"radius":1.0},"rect":{"width":1.0,"height":1.0}}}"#;
    assert!(matches!(mapper.read::<Framed>(two, Format::Json), Err(MapperError::Read { .. })));

    let none = r#"{"label":"a","shape":{}}"#;
    assert!(matches!(mapper.read::<Framed>(none, Format::Json), Err(MapperError::Read { .. })));
}

// -----------------------------------------------------------------------------
// Conflicting names

trait Tool: Subtype + Debug {}

cm_mapper::poly_base!(dyn Tool);

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Saw {
    teeth: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Axe {
    heavy: bool,
}

impl Tool for Saw {}
impl Tool for Axe {}

// Both claim `cutter`; the lower type path wins whatever the submission order.
cm_mapper::subtype!(dyn Tool => Saw as "cutter");
cm_mapper::subtype!(dyn Tool => Axe as "cutter");

#[test]
fn conflicts_resolve_the_same_inside_and_outside_mappers() {
    let axe: Poly<dyn Tool> = Poly::new(Box::new(Axe { heavy: true }));
    let saw: Poly<dyn Tool> = Poly::new(Box::new(Saw { teeth: 40 }));

    // Outside any mapper.
    assert_eq!(serde_json::to_string(&axe).unwrap(), r#"{"cutter":{"heavy":true}}"#);
    assert!(serde_json::to_string(&saw).is_err());
    let back: Poly<dyn Tool> = serde_json::from_str(r#"{"cutter":{"heavy":false}}"#).unwrap();
    assert_eq!(back.downcast_ref::<Axe>(), Some(&Axe { heavy: false }));

    let registry = SubtypeRegistry::submitted();
    let names: Vec<_> = registry.subtypes_of::<dyn Tool>().map(|e| e.concrete_path()).collect();
    assert_eq!(names.len(), 1);
    assert!(names[0].ends_with("::Axe"), "{names:?}");

    let mapper = BeanMapper::with_config(MapperConfig::new().with_indent(0));
    assert_eq!(mapper.write(&axe, Format::Json).unwrap(), r#"{"cutter":{"heavy":true}}"#);
    assert!(matches!(
        mapper.write(&saw, Format::Json),
        Err(MapperError::UnregisteredSubtype { .. })
    ));
}
