//! Fixture files shared by the integration tests.

#![allow(dead_code)]

use hdf5::types::{FixedAscii, VarLenArray, VarLenUnicode};
use hdf5::{H5Type, ObjectReference1};
use hdf5_sys::h5::hsize_t;
use hdf5_sys::h5a::{H5Aclose, H5Acreate2};
use hdf5_sys::h5d::{H5Dclose, H5Dcreate2};
use hdf5_sys::h5g::{H5Gclose, H5Gcreate2};
use hdf5_sys::h5p::{
    H5Pclose, H5Pcreate, H5Pset_link_creation_order, H5P_CRT_ORDER_INDEXED,
    H5P_CRT_ORDER_TRACKED, H5P_DEFAULT,
};
use hdf5_sys::h5s::{H5Sclose, H5Screate_simple};
use hdf5_sys::h5t::{H5T_class_t, H5Tclose, H5Tcreate};
use std::ffi::CString;
use std::path::{Path, PathBuf};
use std::ptr;
use tempfile::TempDir;

/// Root with group `g` holding a 10-element float64 dataset `d`.
pub fn simple_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("simple.h5");
    let file = hdf5::File::create(&path).unwrap();
    let g = file.create_group("g").unwrap();
    g.new_dataset::<f64>().shape(10).create("d").unwrap();
    path
}

/// Three levels of groups with datasets spread across them:
///
/// ```text
/// /
/// ├── a/
/// │   ├── deep/
/// │   │   └── y
/// │   └── x
/// ├── b/
/// │   └── z
/// └── c
/// ```
pub fn nested_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("nested.h5");
    let file = hdf5::File::create(&path).unwrap();

    let a = file.create_group("a").unwrap();
    let b = file.create_group("b").unwrap();
    file.new_dataset::<i32>().shape((4, 5)).create("c").unwrap();

    let deep = a.create_group("deep").unwrap();
    a.new_dataset::<u8>().shape(3).create("x").unwrap();
    b.new_dataset::<f32>().shape((2, 2, 2)).create("z").unwrap();
    deep.new_dataset::<i16>().shape(7).create("y").unwrap();

    path
}

/// File with attributes on every node type and a compressed chunked dataset.
pub fn annotated_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("annotated.h5");
    let file = hdf5::File::create(&path).unwrap();

    let title: VarLenUnicode = "sample run".parse().unwrap();
    file.new_attr::<VarLenUnicode>()
        .create("title")
        .unwrap()
        .write_scalar(&title)
        .unwrap();
    file.new_attr::<u32>()
        .create("version")
        .unwrap()
        .write_scalar(&3u32)
        .unwrap();

    let entry = file.create_group("entry").unwrap();
    entry
        .new_attr::<i64>()
        .shape((2, 3))
        .create("grid")
        .unwrap()
        .write_raw(vec![1i64, 2, 3, 4, 5, 6].as_slice())
        .unwrap();
    entry
        .new_attr::<bool>()
        .create("calibrated")
        .unwrap()
        .write_scalar(&true)
        .unwrap();

    let data = entry
        .new_dataset::<i32>()
        .shape((100, 20))
        .chunk((10, 20))
        .deflate(4)
        .create("counts")
        .unwrap();
    let units: VarLenUnicode = "counts/s".parse().unwrap();
    data.new_attr::<VarLenUnicode>()
        .create("units")
        .unwrap()
        .write_scalar(&units)
        .unwrap();
    data.new_attr::<f64>()
        .shape(2)
        .create("range")
        .unwrap()
        .write_raw(vec![0.0f64, 1.5].as_slice())
        .unwrap();

    path
}

#[derive(H5Type, Clone, Copy)]
#[repr(u8)]
pub enum Level {
    Low = 1,
    High = 7,
}

/// Shaped like a netCDF-4 `REFERENCE_LIST` entry.
#[derive(H5Type, Clone, Copy)]
#[repr(C)]
pub struct DimensionLink {
    pub dataset: ObjectReference1,
    pub dimension: i32,
}

/// Attributes of composite types: a fixed array, an object reference, a
/// ragged array, a list of references, an enum, a compound and a fixed
/// string wider than any preset buffer.
pub fn composite_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("composite.h5");
    let file = hdf5::File::create(&path).unwrap();
    let data = file.new_dataset::<f32>().shape(3).create("data").unwrap();
    let target = file.reference::<ObjectReference1>("data").unwrap();

    data.new_attr::<[i32; 2]>()
        .create("pair")
        .unwrap()
        .write_scalar(&[1, 2])
        .unwrap();
    data.new_attr::<Level>()
        .create("level")
        .unwrap()
        .write_scalar(&Level::High)
        .unwrap();
    data.new_attr::<DimensionLink>()
        .shape(1)
        .create("REFERENCE_LIST")
        .unwrap()
        .write_raw(
            vec![DimensionLink {
                dataset: target,
                dimension: 0,
            }]
            .as_slice(),
        )
        .unwrap();

    file.new_attr::<ObjectReference1>()
        .create("target")
        .unwrap()
        .write_scalar(&target)
        .unwrap();
    file.new_attr::<VarLenArray<i32>>()
        .shape(2)
        .create("ragged")
        .unwrap()
        .write_raw(
            vec![
                VarLenArray::from_slice(&[1, 2, 3]),
                VarLenArray::from_slice(&[4]),
            ]
            .as_slice(),
        )
        .unwrap();
    file.new_attr::<VarLenArray<ObjectReference1>>()
        .shape(1)
        .create("DIMENSION_LIST")
        .unwrap()
        .write_raw(vec![VarLenArray::from_slice(&[target])].as_slice())
        .unwrap();

    let wide = "w".repeat(300);
    file.new_attr::<FixedAscii<300>>()
        .create("wide")
        .unwrap()
        .write_scalar(&FixedAscii::<300>::from_ascii(&wide).unwrap())
        .unwrap();

    path
}

/// Root holding a 3-element dataset `blob` of a 4-byte opaque type, with
/// an attribute `tag` of the same type and shape.
pub fn opaque_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("opaque.h5");
    let file = hdf5::File::create(&path).unwrap();
    let dataset = CString::new("blob").unwrap();
    let attribute = CString::new("tag").unwrap();
    let dims: [hsize_t; 1] = [3];

    hdf5::sync::sync(|| unsafe {
        let tid = H5Tcreate(H5T_class_t::H5T_OPAQUE, 4);
        let sid = H5Screate_simple(1, dims.as_ptr(), ptr::null());
        let did = H5Dcreate2(
            file.id(),
            dataset.as_ptr(),
            tid,
            sid,
            H5P_DEFAULT,
            H5P_DEFAULT,
            H5P_DEFAULT,
        );
        assert!(did >= 0);
        let aid = H5Acreate2(did, attribute.as_ptr(), tid, sid, H5P_DEFAULT, H5P_DEFAULT);
        assert!(aid >= 0);
        H5Aclose(aid);
        H5Dclose(did);
        H5Sclose(sid);
        H5Tclose(tid);
    });

    path
}

/// Group `ordered` that tracks link creation order, with children created
/// as `zeta`, `alpha`, `mid`.
pub fn tracked_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("tracked.h5");
    let file = hdf5::File::create(&path).unwrap();
    let name = CString::new("ordered").unwrap();

    hdf5::sync::sync(|| unsafe {
        let gcpl = H5Pcreate(*hdf5::globals::H5P_GROUP_CREATE);
        assert!(gcpl >= 0);
        let flags = H5P_CRT_ORDER_TRACKED | H5P_CRT_ORDER_INDEXED;
        assert!(H5Pset_link_creation_order(gcpl, flags) >= 0);
        let gid = H5Gcreate2(file.id(), name.as_ptr(), H5P_DEFAULT, gcpl, H5P_DEFAULT);
        assert!(gid >= 0);
        H5Gclose(gid);
        H5Pclose(gcpl);
    });

    let group = file.group("ordered").unwrap();
    group.create_group("zeta").unwrap();
    group.new_dataset::<u8>().shape(1).create("alpha").unwrap();
    group.create_group("mid").unwrap();
    path
}

/// File whose root has no children.
pub fn empty_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("empty.h5");
    hdf5::File::create(&path).unwrap();
    path
}

/// Plain text file with an `.h5` extension.
pub fn text_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("bogus.h5");
    std::fs::write(&path, "this is not hdf5\n").unwrap();
    path
}

/// Item width encoded in a NumPy type string such as `<f8` or `|O`.
pub fn dtype_width(dtype: &str) -> usize {
    let digits: String = dtype.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        8
    } else {
        digits.parse().unwrap()
    }
}

/// Child names of the group at `group_path`, as the library lists them.
pub fn member_names(path: &Path, group_path: &str) -> Vec<String> {
    let file = hdf5::File::open(path).unwrap();
    file.group(group_path).unwrap().member_names().unwrap()
}
