//! ASCII parsing tests with real PLY data

use ply_mesh::{
    parse, parse_file, parse_with, read_ply, Face, ParseOptions, PlyError, PlyFormat, Strictness,
    Vertex,
};
use std::io::Cursor;

#[test]
fn test_single_triangle_scenario() {
    let ply_data = r#"ply
format ascii 1.0
element vertex 1
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
1.0 2.0 3.0
3 0 0 0
"#;

    let mesh = parse(Cursor::new(ply_data)).unwrap();

    assert_eq!(
        mesh.vertices(),
        &[Vertex {
            position: [1.0, 2.0, 3.0],
            ..Vertex::default()
        }]
    );
    assert_eq!(mesh.faces(), &[Face { indices: vec![0, 0, 0] }]);
}

#[test]
fn test_greg_turk_cube() {
    let ply_data = r#"ply
format ascii 1.0
comment made by Greg Turk
comment this file is a cube
element vertex 8
property float x
property float y
property float z
element face 6
property list uchar int vertex_indices
end_header
0 0 0
0 0 1
0 1 1
0 1 0
1 0 0
1 0 1
1 1 1
1 1 0
4 0 1 2 3
4 7 6 5 4
4 0 4 5 1
4 1 5 6 2
4 2 6 7 3
4 3 7 4 0
"#;

    let data = read_ply(Cursor::new(ply_data), &ParseOptions::default()).unwrap();
    assert_eq!(data.header.format, PlyFormat::Ascii);
    assert_eq!(data.header.comments.len(), 2);

    let mesh = parse(Cursor::new(ply_data)).unwrap();
    assert_eq!(mesh.vertices().len(), 8);
    assert_eq!(mesh.faces().len(), 6);
    assert_eq!(mesh.vertices()[6].position, [1.0, 1.0, 1.0]);
    assert_eq!(mesh.faces()[0].indices, vec![0, 1, 2, 3]);
    assert_eq!(mesh.faces()[5].indices, vec![3, 7, 4, 0]);
}

#[test]
fn test_all_scalar_types() {
    let ply_data = r#"ply
format ascii 1.0
element point 1
property char a
property int8 b
property uchar c
property uint8 d
property short e
property int16 f
property uint16 g
property ushort h
property int32 i
property int j
property uint32 k
property uint l
property float32 m
property float n
property float64 o
property double p
end_header
-1 1 2 2 -3 3 4 4 5 5 6 6 7.5 7 8.25 8
"#;

    let data = read_ply(Cursor::new(ply_data), &ParseOptions::default()).unwrap();
    let point = &data.element("point").unwrap()[0];

    assert_eq!(point.len(), 16);
    assert_eq!(point.value("a"), -1.0);
    assert_eq!(point.value("c"), 2.0);
    assert_eq!(point.value("e"), -3.0);
    assert_eq!(point.value("g"), 4.0);
    assert_eq!(point.value("i"), 5.0);
    assert_eq!(point.value("k"), 6.0);
    assert_eq!(point.value("m"), 7.5);
    assert_eq!(point.value("o"), 8.25);
    assert_eq!(point.value("p"), 8.0);
}

#[test]
fn test_full_vertex_with_colors() {
    let ply_data = r#"ply
format ascii 1.0
element vertex 2
property float x
property float y
property float z
property float nx
property float ny
property float nz
property uchar red
property uchar green
property uchar blue
property uchar alpha
element face 0
property list uchar int vertex_indices
end_header
1 -1 0 0 0 1 255 128 0 255
-1 1 0.5 0 1 0 10 20 30 40
"#;

    let mesh = parse(Cursor::new(ply_data)).unwrap();

    assert_eq!(
        mesh.vertices()[1],
        Vertex {
            position: [-1.0, 1.0, 0.5],
            normal: [0.0, 1.0, 0.0],
            color: [10, 20, 30, 40],
        }
    );
    assert!(mesh.faces().is_empty());
}

#[test]
fn test_zero_length_lists() {
    let ply_data = r#"ply
format ascii 1.0
element vertex 0
property float x
element face 3
property list uchar int vertex_indices
end_header
0
2 5 6
0
"#;

    let mesh = parse(Cursor::new(ply_data)).unwrap();
    let lengths: Vec<usize> = mesh.faces().iter().map(|f| f.indices.len()).collect();
    assert_eq!(lengths, vec![0, 2, 0]);
}

#[test]
fn test_records_need_not_follow_lines() {
    let ply_data = "ply\nformat ascii 1.0\nelement vertex 2\nproperty float x\nproperty float y\nproperty float z\nelement face 1\nproperty list uchar int vertex_indices\nend_header\n1 2\n3 4 5 6 3 0\n1 1";

    let mesh = parse(Cursor::new(ply_data)).unwrap();
    assert_eq!(mesh.vertices()[0].position, [1.0, 2.0, 3.0]);
    assert_eq!(mesh.vertices()[1].position, [4.0, 5.0, 6.0]);
    assert_eq!(mesh.faces()[0].indices, vec![0, 1, 1]);
}

#[test]
fn test_ascii_incomplete() {
    let ply_data = r#"ply
format ascii 1.0
element vertex 3
property float x
property float y
property float z
element face 0
end_header
0.0 0.0 0.0
1.0 0.0
"#;

    let err = parse(Cursor::new(ply_data)).unwrap_err();
    assert!(matches!(err, PlyError::TruncatedInput));
}

#[test]
fn test_ascii_garbage_token() {
    let ply_data = "ply\nformat ascii 1.0\nelement vertex 1\nproperty float x\nelement face 0\nend_header\nabc\n";

    let err = parse(Cursor::new(ply_data)).unwrap_err();
    assert!(matches!(err, PlyError::InvalidNumber { token, .. } if token == "abc"));
}

#[test]
fn test_header_errors() {
    let cases = [
        ("ply \nformat ascii 1.0\nend_header\n", "malformed"),
        ("ply\nformat foo 1.0\nend_header\n", "format"),
        ("ply\nformat ascii 2.0\nend_header\n", "version"),
    ];

    for (text, kind) in cases {
        let err = parse(Cursor::new(text)).unwrap_err();
        match kind {
            "malformed" => assert!(matches!(err, PlyError::MalformedHeader(_)), "{err}"),
            "format" => assert!(matches!(err, PlyError::UnknownFormat(_)), "{err}"),
            "version" => assert!(matches!(err, PlyError::UnsupportedVersion(_)), "{err}"),
            _ => unreachable!(),
        }
    }
}

#[test]
fn test_missing_face_element() {
    let ply_data = r#"ply
format ascii 1.0
element vertex 1
property float x
property float y
property float z
end_header
1 2 3
"#;

    let err = parse(Cursor::new(ply_data)).unwrap_err();
    assert!(matches!(err, PlyError::MissingElement(name) if name == "face"));
}

#[test]
fn test_strict_options() {
    let ply_data = r#"ply
format ascii 1.0
element vertex 1
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
1 2 3
3 0 0 0
"#;

    let err = parse_with(Cursor::new(ply_data), &ParseOptions::strict()).unwrap_err();
    assert!(matches!(err, PlyError::MissingProperty { property, .. } if property == "nx"));

    let with_unknown_line = ply_data.replace("end_header", "vendor_extension 1\nend_header");
    assert!(parse(Cursor::new(&with_unknown_line)).is_ok());

    let options = ParseOptions::default().with_header_policy(Strictness::Strict);
    let err = parse_with(Cursor::new(&with_unknown_line), &options).unwrap_err();
    assert!(matches!(err, PlyError::MalformedHeader(_)));
}

#[test]
fn test_parse_file() {
    let ply_data = "ply\nformat ascii 1.0\nelement vertex 1\nproperty float x\nelement face 1\nproperty list uchar int vertex_indices\nend_header\n4.5\n1 0\n";

    let path = std::env::temp_dir().join(format!("ply_mesh_parse_file_{}.ply", std::process::id()));
    std::fs::write(&path, ply_data).unwrap();
    let result = parse_file(&path, &ParseOptions::default());
    std::fs::remove_file(&path).unwrap();

    let mesh = result.unwrap();
    assert_eq!(mesh.vertices()[0].position, [4.5, 0.0, 0.0]);
    assert_eq!(mesh.faces()[0].indices, vec![0]);
}

#[test]
fn test_parse_missing_file() {
    let path = std::env::temp_dir().join("ply_mesh_definitely_missing.ply");
    let err = parse_file(&path, &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, PlyError::Io(_)));
}
