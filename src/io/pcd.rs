//! PCD point extraction.
//!
//! The PCD container is decoded by an external reader into a [`PcdCloud`]:
//! a packed byte buffer plus named field descriptors. This module locates
//! the position and normal fields by name and decodes each value by its
//! declared width.

use byteorder::{ByteOrder, LittleEndian};
use std::path::Path;

use super::PointRecord;
use crate::util::{Error, Result, Vec3};

/// Numeric type of a PCD field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PcdDatatype {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
    Unknown(u8),
}

impl PcdDatatype {
    /// Parse from the PCL datatype code.
    pub fn from_u8(val: u8) -> Self {
        match val {
            1 => PcdDatatype::Int8,
            2 => PcdDatatype::Uint8,
            3 => PcdDatatype::Int16,
            4 => PcdDatatype::Uint16,
            5 => PcdDatatype::Int32,
            6 => PcdDatatype::Uint32,
            7 => PcdDatatype::Float32,
            8 => PcdDatatype::Float64,
            other => PcdDatatype::Unknown(other),
        }
    }

    /// Convert to the PCL datatype code.
    pub fn to_u8(self) -> u8 {
        match self {
            PcdDatatype::Int8 => 1,
            PcdDatatype::Uint8 => 2,
            PcdDatatype::Int16 => 3,
            PcdDatatype::Uint16 => 4,
            PcdDatatype::Int32 => 5,
            PcdDatatype::Uint32 => 6,
            PcdDatatype::Float32 => 7,
            PcdDatatype::Float64 => 8,
            PcdDatatype::Unknown(v) => v,
        }
    }
}

/// A named field within each packed point.
#[derive(Clone, Debug, PartialEq)]
pub struct PcdField {
    pub name: String,
    /// Byte offset within a point.
    pub offset: usize,
    pub datatype: PcdDatatype,
}

impl PcdField {
    pub fn new(name: impl Into<String>, offset: usize, datatype: PcdDatatype) -> Self {
        Self { name: name.into(), offset, datatype }
    }

    /// Build a field from the raw PCL datatype code found in PCD headers.
    pub fn from_code(name: impl Into<String>, offset: usize, code: u8) -> Self {
        Self::new(name, offset, PcdDatatype::from_u8(code))
    }
}

/// Raw point cloud as produced by the PCD reader.
#[derive(Clone, Debug, Default)]
pub struct PcdCloud {
    pub width: usize,
    pub height: usize,
    /// Bytes per point.
    pub point_step: usize,
    pub fields: Vec<PcdField>,
    pub data: Vec<u8>,
}

impl PcdCloud {
    /// Number of points (`width * height`).
    #[inline]
    pub fn num_points(&self) -> usize {
        self.width * self.height
    }

    /// Find a field by name.
    pub fn field(&self, name: &str) -> Option<&PcdField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// External PCD reader.
pub trait PcdIo {
    fn read(&self, path: &Path) -> Result<PcdCloud>;
}

/// Decode one field of the point starting at `base`.
fn read_field(cloud: &PcdCloud, base: usize, field: &PcdField) -> Result<f32> {
    let width = match field.datatype {
        PcdDatatype::Float32 => 4,
        PcdDatatype::Float64 => 8,
        other => {
            return Err(Error::UnsupportedFieldType {
                field: field.name.clone(),
                datatype: other.to_u8(),
            })
        }
    };
    let start = base + field.offset;
    let bytes = cloud
        .data
        .get(start..start + width)
        .ok_or_else(|| {
            Error::invalid(format!("PCD field `{}` out of bounds at byte {}", field.name, start))
        })?;

    Ok(match field.datatype {
        PcdDatatype::Float64 => LittleEndian::read_f64(bytes) as f32,
        _ => LittleEndian::read_f32(bytes),
    })
}

/// Extract positions and, when `normal_x/y/z` are all present, normals.
///
/// `x`, `y` and `z` are mandatory; without them nothing is extracted and
/// [`Error::MissingRequiredField`] is returned.
pub fn extract_points(cloud: &PcdCloud) -> Result<Vec<PointRecord>> {
    let (x, y, z) = match (cloud.field("x"), cloud.field("y"), cloud.field("z")) {
        (Some(x), Some(y), Some(z)) => (x, y, z),
        _ => {
            return Err(Error::MissingRequiredField(
                "PCD must contain x, y, z fields".to_string(),
            ))
        }
    };
    let normals = match (
        cloud.field("normal_x"),
        cloud.field("normal_y"),
        cloud.field("normal_z"),
    ) {
        (Some(nx), Some(ny), Some(nz)) => Some((nx, ny, nz)),
        _ => None,
    };

    let n = cloud.num_points();
    let mut records = Vec::with_capacity(n);
    for i in 0..n {
        let base = i * cloud.point_step;
        let position = Vec3::new(
            read_field(cloud, base, x)?,
            read_field(cloud, base, y)?,
            read_field(cloud, base, z)?,
        );
        let normal = match normals {
            Some((nx, ny, nz)) => Some(Vec3::new(
                read_field(cloud, base, nx)?,
                read_field(cloud, base, ny)?,
                read_field(cloud, base, nz)?,
            )),
            None => None,
        };
        records.push(PointRecord { position, normal, color: None });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;

    /// Packs `x y z` as f64 and `normal_x/y/z` as f32, with 4 padding bytes.
    fn mixed_cloud(points: &[([f64; 3], [f32; 3])]) -> PcdCloud {
        let mut data = Vec::new();
        for (p, n) in points {
            data.write_u32::<LittleEndian>(0xDEAD).unwrap();
            for c in p {
                data.write_f64::<LittleEndian>(*c).unwrap();
            }
            for c in n {
                data.write_f32::<LittleEndian>(*c).unwrap();
            }
        }
        PcdCloud {
            width: points.len(),
            height: 1,
            point_step: 4 + 24 + 12,
            fields: vec![
                PcdField::from_code("normal_z", 36, 7),
                PcdField::from_code("x", 4, 8),
                PcdField::from_code("y", 12, 8),
                PcdField::from_code("z", 20, 8),
                PcdField::from_code("normal_x", 28, 7),
                PcdField::from_code("normal_y", 32, 7),
            ],
            data,
        }
    }

    #[test]
    fn test_fields_located_by_name() {
        let cloud = mixed_cloud(&[
            ([1.0, 2.0, 3.0], [0.0, 0.0, 1.0]),
            ([-1.5, 0.25, 8.0], [1.0, 0.0, 0.0]),
        ]);
        let records = extract_points(&cloud).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(records[0].normal, Some(Vec3::Z));
        assert_eq!(records[1].position, Vec3::new(-1.5, 0.25, 8.0));
        assert_eq!(records[1].normal, Some(Vec3::X));
    }

    #[test]
    fn test_missing_xyz() {
        let mut cloud = mixed_cloud(&[([1.0, 2.0, 3.0], [0.0, 0.0, 1.0])]);
        cloud.fields.retain(|f| f.name != "y");
        let err = extract_points(&cloud).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField(_)));
    }

    #[test]
    fn test_partial_normals_ignored() {
        let mut cloud = mixed_cloud(&[([1.0, 2.0, 3.0], [0.0, 0.0, 1.0])]);
        cloud.fields.retain(|f| f.name != "normal_y");
        let records = extract_points(&cloud).unwrap();
        assert_eq!(records[0].normal, None);
    }

    #[test]
    fn test_unsupported_type() {
        let mut cloud = mixed_cloud(&[([1.0, 2.0, 3.0], [0.0, 0.0, 1.0])]);
        cloud.fields[1].datatype = PcdDatatype::Int32;
        let err = extract_points(&cloud).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFieldType { datatype: 5, .. }));
    }

    #[test]
    fn test_datatype_codes() {
        assert_eq!(PcdDatatype::from_u8(7), PcdDatatype::Float32);
        assert_eq!(PcdDatatype::from_u8(8), PcdDatatype::Float64);
        assert_eq!(PcdDatatype::from_u8(2), PcdDatatype::Uint8);
        assert_eq!(PcdDatatype::from_u8(42), PcdDatatype::Unknown(42));
        assert_eq!(PcdDatatype::from_u8(5).to_u8(), 5);

        let mut cloud = mixed_cloud(&[([1.0, 2.0, 3.0], [0.0, 0.0, 1.0])]);
        cloud.fields[2] = PcdField::from_code("y", 12, 42);
        let err = extract_points(&cloud).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFieldType { datatype: 42, .. }));
    }

    #[test]
    fn test_truncated_buffer() {
        let mut cloud = mixed_cloud(&[([1.0, 2.0, 3.0], [0.0, 0.0, 1.0])]);
        cloud.width = 2;
        assert!(matches!(extract_points(&cloud), Err(Error::InvalidData(_))));
    }
}
