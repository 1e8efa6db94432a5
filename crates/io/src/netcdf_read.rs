//! Low-level NetCDF extraction helpers.

use std::path::Path;

use ndarray::Array3;
use netcdf::AttributeValue;

use crate::error::IoError;

/// Open a NetCDF file at `path`, returning [`IoError::FileNotFound`] if the
/// path does not exist on disk.
pub(crate) fn open_file(path: &Path) -> Result<netcdf::File, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(netcdf::open(path)?)
}

/// Read a 1-D `f32` variable, trying each alias in order.
///
/// Returns the data from the first alias that matches. If none match,
/// returns [`IoError::MissingVariable`] with the first alias as the name.
pub(crate) fn read_1d_f32(
    file: &netcdf::File,
    aliases: &[&str],
    path: &Path,
) -> Result<Vec<f32>, IoError> {
    for &alias in aliases {
        if let Some(var) = file.variable(alias) {
            return Ok(var.get_values::<f32, _>(..)?);
        }
    }

    let name = aliases.first().copied().unwrap_or("unknown");
    Err(IoError::MissingVariable {
        name: name.to_string(),
        path: path.to_path_buf(),
    })
}

/// Read a 3-D variable as `f64` with shape `(nt, ny, nx)` taken from its
/// dimensions.
///
/// CF packing is undone: raw values equal to `_FillValue` or
/// `missing_value` become NaN, the rest are mapped through
/// `raw * scale_factor + add_offset` when those attributes are present.
pub(crate) fn read_3d_f64(
    file: &netcdf::File,
    var_name: &str,
    path: &Path,
) -> Result<Array3<f64>, IoError> {
    let var = file
        .variable(var_name)
        .ok_or_else(|| IoError::MissingVariable {
            name: var_name.to_string(),
            path: path.to_path_buf(),
        })?;

    let dims = var.dimensions();
    if dims.len() != 3 {
        return Err(IoError::DimensionMismatch {
            name: format!("{var_name} dimensions"),
            expected: 3,
            got: dims.len(),
        });
    }
    let shape = (dims[0].len(), dims[1].len(), dims[2].len());

    let scale = attribute_f64(&var, "scale_factor").unwrap_or(1.0);
    let offset = attribute_f64(&var, "add_offset").unwrap_or(0.0);
    let fill = attribute_f64(&var, "_FillValue");
    let missing = attribute_f64(&var, "missing_value");

    let raw = var.get_values::<f64, _>(..)?;
    let got = raw.len();
    let mut data = Array3::from_shape_vec(shape, raw).map_err(|_| IoError::DimensionMismatch {
        name: format!("{var_name} values"),
        expected: shape.0 * shape.1 * shape.2,
        got,
    })?;

    data.mapv_inplace(|v| {
        if Some(v) == fill || Some(v) == missing {
            f64::NAN
        } else {
            v * scale + offset
        }
    });
    Ok(data)
}

/// Read a numeric scalar attribute of `var` as `f64`, if present.
fn attribute_f64(var: &netcdf::Variable<'_>, name: &str) -> Option<f64> {
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Float(v) => Some(f64::from(v)),
        AttributeValue::Int(v) => Some(f64::from(v)),
        AttributeValue::Short(v) => Some(f64::from(v)),
        AttributeValue::Schar(v) => Some(f64::from(v)),
        AttributeValue::Uchar(v) => Some(f64::from(v)),
        AttributeValue::Ushort(v) => Some(f64::from(v)),
        AttributeValue::Uint(v) => Some(f64::from(v)),
        AttributeValue::Doubles(v) => v.first().copied(),
        AttributeValue::Floats(v) => v.first().map(|&x| f64::from(x)),
        _ => None,
    }
}
