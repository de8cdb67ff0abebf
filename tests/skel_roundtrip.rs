//! Integration tests for writing SKEL documents and reading them back.

use pointskel::geom::{Branch, CurvePoint, PointCloud, Skeleton, Vertex, NO_SAMPLE};
use pointskel::skel::{load_skel, read_skel, save_skel, write_skel, SkelDocument};
use pointskel::util::Vec3;
use pointskel::Error;

use tempfile::NamedTempFile;

fn sample_cloud() -> PointCloud {
    let mut samples = PointCloud::new();
    for i in 0..5 {
        let f = i as f32;
        let mut v = Vertex::new(
            Vec3::new(0.1 * f, -1.25 + f, 3.0e-3 * f * f),
            Vec3::new(0.0, 0.6, 0.8),
        );
        v.is_fixed_sample = i % 2 == 0;
        v.is_skel_virtual = i == 3;
        v.is_skel_branch = i >= 2;
        v.eigen_confidence = f64::from(0.125 * f + 0.3);
        samples.push(v);
    }
    samples
}

fn original_cloud() -> PointCloud {
    let vertices = (0..7)
        .map(|i| {
            let f = i as f32;
            Vertex::new(Vec3::new(f * 0.37, 2.0 - f, f * f * 0.01), Vec3::new(1.0, 0.0, 0.0))
        })
        .collect();
    PointCloud::from_vertices(vertices, true)
}

fn point(position: Vec3, skel_radius: f64, sample: i32) -> CurvePoint {
    CurvePoint { skel_radius, corresponding_sample_index: sample, ..CurvePoint::new(position) }
}

fn skeleton() -> Skeleton {
    Skeleton::from_branches(vec![
        Branch::new(vec![
            point(Vec3::new(0.0, 0.0, 0.0), 0.05, 0),
            CurvePoint { is_virtual: true, ..point(Vec3::new(0.5, 0.25, 0.0), 0.075, NO_SAMPLE) },
            point(Vec3::new(1.0, 0.5, 0.1), 0.1, 2),
        ]),
        Branch::new(vec![
            point(Vec3::new(1.0, 0.5, 0.1), 0.2, 2),
            point(Vec3::new(-2.0, 1.0e-4, 7.5), 0.3, 4),
        ]),
    ])
}

fn assert_vertices_eq(a: &PointCloud, b: &PointCloud) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.vertices.iter().zip(&b.vertices) {
        assert_eq!(x.position, y.position);
        assert_eq!(x.normal, y.normal);
        assert_eq!(x.is_original, y.is_original);
        assert_eq!(x.is_fixed_sample, y.is_fixed_sample);
        assert_eq!(x.is_skel_virtual, y.is_skel_virtual);
        assert_eq!(x.is_skel_branch, y.is_skel_branch);
        assert_eq!(x.eigen_confidence, y.eigen_confidence);
        assert_eq!(x.index, y.index);
    }
}

#[test]
fn test_roundtrip_full_document() {
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    let path = temp.path();

    let original = original_cloud();
    let samples = sample_cloud();
    let skel = skeleton();

    save_skel(path, &original, &samples, &skel).expect("Failed to save");
    let doc = load_skel(path).expect("Failed to load");

    assert_vertices_eq(&doc.original, &original);
    assert_vertices_eq(&doc.samples, &samples);
    assert_eq!(doc.original.bbox, original.bbox);
    assert_eq!(doc.samples.bbox, samples.bbox);

    assert_eq!(doc.skeleton.num_branches(), 2);
    assert_eq!(doc.skeleton.size(), 5);
    for (a, b) in doc.skeleton.branches.iter().zip(&skel.branches) {
        assert_eq!(a, b);
    }

    // correspondence index is rebuilt on load
    let at_two = doc.skeleton.branches_at_sample(2);
    assert_eq!(at_two.len(), 2);
    assert_eq!((at_two[0].branch, at_two[0].point), (0, 2));
    assert_eq!((at_two[1].branch, at_two[1].point), (1, 0));
    assert!(doc.skeleton.branches_at_sample(1).is_empty());
}

#[test]
fn test_roundtrip_text_is_stable() {
    let doc = SkelDocument {
        original: original_cloud(),
        samples: sample_cloud(),
        skeleton: skeleton(),
    };
    let first = doc.to_text().unwrap();
    let second = read_skel(&first).unwrap().to_text().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_section_order_on_disk() {
    let mut buf = Vec::new();
    write_skel(&mut buf, &original_cloud(), &sample_cloud(), &skeleton()).unwrap();
    let text = String::from_utf8(buf).unwrap();

    let tags: Vec<&str> = text
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .filter(|t| t.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) && *t != "CNN")
        .collect();
    assert_eq!(
        tags,
        vec![
            "ON", "SN", "CN", "EN", "BN", "S_onedge", "GroupID", "SkelRadius",
            "Confidence_Sigma", "SkelRadius2", "Alpha", "Sample_isVirtual",
            "Sample_isBranch", "Sample_radius", "Skel_isVirtual",
            "Corresponding_sample_index",
        ]
    );
}

#[test]
fn test_original_skip_path_with_zero_count() {
    // ON 0 matches the freshly cleared original size: nothing is populated
    // and no coordinate tokens are expected.
    let mut buf = Vec::new();
    write_skel(&mut buf, &PointCloud::new(), &sample_cloud(), &skeleton()).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.starts_with("ON 0\n\nSN 5\n"));

    let doc = read_skel(&text).unwrap();
    assert!(doc.original.is_empty());
    assert!(doc.original.bbox.is_null());
    assert_eq!(doc.samples.len(), 5);
}

#[test]
fn test_original_loads_when_count_nonzero() {
    let mut buf = Vec::new();
    write_skel(&mut buf, &original_cloud(), &PointCloud::new(), &Skeleton::new()).unwrap();
    let doc = read_skel(std::str::from_utf8(&buf).unwrap()).unwrap();

    assert_eq!(doc.original.len(), 7);
    assert!(doc.original.vertices.iter().all(|v| v.is_original));
    assert_eq!(doc.original.vertices[6].index, 6);
    assert!(doc.skeleton.is_empty());
}

#[test]
fn test_sentinel_sample_index_roundtrip() {
    let skel = Skeleton::from_branches(vec![Branch::new(vec![
        CurvePoint::new(Vec3::ZERO),
        CurvePoint::new(Vec3::ONE),
    ])]);
    let mut buf = Vec::new();
    write_skel(&mut buf, &PointCloud::new(), &PointCloud::new(), &skel).unwrap();
    let doc = read_skel(std::str::from_utf8(&buf).unwrap()).unwrap();

    for cp in doc.skeleton.curve_points() {
        assert_eq!(cp.corresponding_sample_index, NO_SAMPLE);
        assert_eq!(cp.sample_index(), None);
    }
}

#[test]
fn test_curve_count_mismatch_rejected() {
    let mut buf = Vec::new();
    write_skel(&mut buf, &PointCloud::new(), &sample_cloud(), &skeleton()).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let broken = text.replace("Skel_isVirtual 5", "Skel_isVirtual 4");

    let err = read_skel(&broken).unwrap_err();
    assert!(matches!(
        err,
        Error::CountMismatch { section: "Skel_isVirtual", expected: 5, found: 4 }
    ));
}

#[test]
fn test_load_missing_file() {
    let err = load_skel("/nonexistent/dir/model.skel").unwrap_err();
    assert!(matches!(err, Error::FileNotFound(_)));
}
