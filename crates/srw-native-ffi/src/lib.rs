//! C ABI for the SRW native library.
//!
//! Loaders return an [`SrwLoadResult`] by value. Every buffer it points to is
//! allocated here and must be released with [`srw_free_load_result`]; the host
//! never frees them with its own allocator.

use srw_native::{DatError, MeshData, MeshMetadata, RawDat};
use std::ffi::{CStr, CString, c_char, c_int};
use std::path::Path;
use std::ptr;

pub const SRW_OK: c_int = 0;
pub const SRW_ERR_INVALID_ARGUMENT: c_int = -1;
pub const SRW_ERR_IO: c_int = -2;
pub const SRW_ERR_SCHEMA: c_int = -3;
pub const SRW_ERR_PARSE: c_int = -4;
pub const SRW_ERR_ENCODING: c_int = -5;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SrwMeshInfo {
    pub ne: u32,
    pub nx: u32,
    pub ny: u32,
    pub e_min: f64,
    pub e_max: f64,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl From<&MeshMetadata> for SrwMeshInfo {
    fn from(m: &MeshMetadata) -> Self {
        Self {
            ne: m.point_count_energy,
            nx: m.point_count_x,
            ny: m.point_count_y,
            e_min: m.energy_min,
            e_max: m.energy_max,
            x_min: m.x_min,
            x_max: m.x_max,
            y_min: m.y_min,
            y_max: m.y_max,
        }
    }
}

#[repr(C)]
pub struct SrwLoadResult {
    pub status: c_int,
    pub mesh: SrwMeshInfo,
    pub headers: *mut *mut c_char,
    pub n_headers: usize,
    pub values: *mut f64,
    pub n_values: usize,
    pub error: *mut c_char,
}

impl SrwLoadResult {
    fn empty(status: c_int) -> Self {
        Self {
            status,
            mesh: SrwMeshInfo::default(),
            headers: ptr::null_mut(),
            n_headers: 0,
            values: ptr::null_mut(),
            n_values: 0,
            error: ptr::null_mut(),
        }
    }

    fn error(status: c_int, msg: &str) -> Self {
        let mut result = Self::empty(status);
        result.error = CString::new(msg.replace('\0', " "))
            .map(CString::into_raw)
            .unwrap_or(ptr::null_mut());
        result
    }

    fn from_dat_error(err: &DatError) -> Self {
        let status = match err {
            DatError::Io(_) => SRW_ERR_IO,
            DatError::Schema { .. } => SRW_ERR_SCHEMA,
            DatError::Parse { .. } => SRW_ERR_PARSE,
        };
        Self::error(status, &err.to_string())
    }

    fn success(mesh: SrwMeshInfo, header_lines: Vec<String>, values: Vec<f64>) -> Self {
        let mut c_headers = Vec::with_capacity(header_lines.len());
        for line in header_lines {
            match CString::new(line) {
                Ok(s) => c_headers.push(s),
                Err(_) => {
                    return Self::error(SRW_ERR_ENCODING, "Header line contains a NUL byte");
                }
            }
        }

        let mut result = Self::empty(SRW_OK);
        result.mesh = mesh;
        result.n_headers = c_headers.len();
        if !c_headers.is_empty() {
            let raw: Box<[*mut c_char]> = c_headers.into_iter().map(CString::into_raw).collect();
            result.headers = Box::into_raw(raw) as *mut *mut c_char;
        }
        result.n_values = values.len();
        if !values.is_empty() {
            result.values = Box::into_raw(values.into_boxed_slice()) as *mut f64;
        }
        result
    }
}

/// # Safety
///
/// `path` must be null or a valid NUL-terminated string.
unsafe fn path_from_c<'a>(path: *const c_char) -> Result<&'a Path, SrwLoadResult> {
    if path.is_null() {
        return Err(SrwLoadResult::error(
            SRW_ERR_INVALID_ARGUMENT,
            "Path is null",
        ));
    }
    let c_path = unsafe { CStr::from_ptr(path) };
    path_from_bytes(c_path)
}

/// Unix paths are arbitrary bytes and are taken as-is.
#[cfg(unix)]
fn path_from_bytes(c_path: &CStr) -> Result<&Path, SrwLoadResult> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    Ok(Path::new(OsStr::from_bytes(c_path.to_bytes())))
}

#[cfg(not(unix))]
fn path_from_bytes(c_path: &CStr) -> Result<&Path, SrwLoadResult> {
    c_path.to_str().map(Path::new).map_err(|_| {
        SrwLoadResult::error(SRW_ERR_INVALID_ARGUMENT, "Path is not valid UTF-8")
    })
}

/// Sums `length` doubles starting at `data`. A null `data` sums to `0.0`.
///
/// # Safety
///
/// `data` must be null or point to `length` readable doubles.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn srw_sum(data: *const f64, length: usize) -> f64 {
    if data.is_null() || length == 0 {
        return 0.0;
    }
    let slice = unsafe { std::slice::from_raw_parts(data, length) };
    srw_native::sum(slice)
}

/// Multiplies `length` doubles starting at `data` by `factor`, in place.
///
/// # Safety
///
/// `data` must be null or point to `length` writable doubles.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn srw_scale(data: *mut f64, length: usize, factor: f64) {
    if data.is_null() || length == 0 {
        return;
    }
    let slice = unsafe { std::slice::from_raw_parts_mut(data, length) };
    srw_native::scale(slice, factor);
}

/// Loads an SRW mesh file: decoded mesh, the ten header lines and all values.
///
/// # Safety
///
/// `path` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn srw_load_file(path: *const c_char) -> SrwLoadResult {
    let path = match unsafe { path_from_c(path) } {
        Ok(p) => p,
        Err(result) => return result,
    };
    match srw_native::load_file(path) {
        Ok(MeshData {
            metadata,
            header_lines,
            values,
        }) => SrwLoadResult::success(SrwMeshInfo::from(&metadata), header_lines, values),
        Err(e) => SrwLoadResult::from_dat_error(&e),
    }
}

/// Loads every leading `#` line and every numeric token of a text file.
/// `mesh` is left zeroed.
///
/// # Safety
///
/// `path` must be null or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn srw_load_raw_file(path: *const c_char) -> SrwLoadResult {
    let path = match unsafe { path_from_c(path) } {
        Ok(p) => p,
        Err(result) => return result,
    };
    match srw_native::load_raw_file(path) {
        Ok(RawDat {
            header_lines,
            values,
        }) => SrwLoadResult::success(SrwMeshInfo::default(), header_lines, values),
        Err(e) => SrwLoadResult::from_dat_error(&e),
    }
}

/// Releases every buffer owned by `result` and resets its pointers and counts.
/// Safe to call more than once on the same result.
///
/// # Safety
///
/// `result` must be null or point to a result returned by one of the loaders
/// that has not been modified by the caller.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn srw_free_load_result(result: *mut SrwLoadResult) {
    if result.is_null() {
        return;
    }
    let r = unsafe { &mut *result };

    if !r.headers.is_null() {
        let headers = unsafe {
            Box::from_raw(ptr::slice_from_raw_parts_mut(r.headers, r.n_headers))
        };
        for &line in headers.iter() {
            if !line.is_null() {
                drop(unsafe { CString::from_raw(line) });
            }
        }
    }
    if !r.values.is_null() {
        drop(unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(r.values, r.n_values)) });
    }
    if !r.error.is_null() {
        drop(unsafe { CString::from_raw(r.error) });
    }

    r.headers = ptr::null_mut();
    r.n_headers = 0;
    r.values = ptr::null_mut();
    r.n_values = 0;
    r.error = ptr::null_mut();
}
