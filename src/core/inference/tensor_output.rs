//! Raw tensor output representation for inference results.
//!
//! The runner stores whatever the session produced without interpreting it;
//! callers validate the shape and convert to the array type they expect.

use crate::core::errors::KeymarkError;
use ndarray::{Array2, ArrayD};

/// A raw output tensor read back from the session.
///
/// Keypoint heads produce f32 data, so that is the only element type carried
/// here. The shape is kept as reported by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum TensorOutput {
    /// 32-bit floating point tensor.
    F32 {
        /// Dimensions as reported by the runtime.
        shape: Vec<i64>,
        /// Flat row-major data.
        data: Vec<f32>,
    },
}

impl TensorOutput {
    /// Returns the shape of the tensor.
    pub fn shape(&self) -> &[i64] {
        match self {
            TensorOutput::F32 { shape, .. } => shape,
        }
    }

    /// Returns the number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    /// Returns the total number of elements.
    pub fn len(&self) -> usize {
        self.shape().iter().map(|&d| d as usize).product()
    }

    /// Returns true if the tensor has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the flat data buffer.
    pub fn data(&self) -> &[f32] {
        match self {
            TensorOutput::F32 { data, .. } => data,
        }
    }

    /// Attempts to extract as a 2D f32 array.
    ///
    /// # Errors
    ///
    /// Returns an error if the tensor is not 2-dimensional or the data
    /// length doesn't match the shape.
    pub fn try_into_array2_f32(self) -> Result<Array2<f32>, KeymarkError> {
        let TensorOutput::F32 { shape, data } = self;
        if shape.len() != 2 {
            return Err(KeymarkError::invalid_input(format!(
                "Expected 2D tensor, got {}D with shape {:?}",
                shape.len(),
                shape
            )));
        }

        let dim0 = shape[0] as usize;
        let dim1 = shape[1] as usize;
        let expected_len = dim0 * dim1;

        if data.len() != expected_len {
            return Err(KeymarkError::invalid_input(format!(
                "Data length mismatch: expected {}, got {}",
                expected_len,
                data.len()
            )));
        }

        Array2::from_shape_vec((dim0, dim1), data).map_err(KeymarkError::Tensor)
    }

    /// Attempts to extract as a dynamic-dimensional f32 array.
    pub fn try_into_array_f32(self) -> Result<ArrayD<f32>, KeymarkError> {
        let TensorOutput::F32 { shape, data } = self;
        let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
        let expected_len: usize = dims.iter().product();

        if data.len() != expected_len {
            return Err(KeymarkError::invalid_input(format!(
                "Data length mismatch: expected {}, got {}",
                expected_len,
                data.len()
            )));
        }

        ArrayD::from_shape_vec(dims, data).map_err(KeymarkError::Tensor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f32_tensor(shape: &[i64], data: Vec<f32>) -> TensorOutput {
        TensorOutput::F32 {
            shape: shape.to_vec(),
            data,
        }
    }

    #[test]
    fn shape_and_ndim() {
        let t = f32_tensor(&[1, 14], vec![0.0; 14]);
        assert_eq!(t.shape(), &[1, 14]);
        assert_eq!(t.ndim(), 2);
    }

    #[test]
    fn len_and_is_empty() {
        let t = f32_tensor(&[2, 3], vec![0.0; 6]);
        assert_eq!(t.len(), 6);
        assert!(!t.is_empty());

        let empty = f32_tensor(&[0, 3], vec![]);
        assert_eq!(empty.len(), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn array2_ok() {
        let t = f32_tensor(&[2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let arr = t.try_into_array2_f32().unwrap();
        assert_eq!(arr.shape(), &[2, 3]);
        assert_eq!(arr[[1, 2]], 6.0);
    }

    #[test]
    fn array2_wrong_ndim() {
        let t = f32_tensor(&[2, 3, 4], vec![0.0; 24]);
        let err = t.try_into_array2_f32().unwrap_err().to_string();
        assert!(err.contains("Expected 2D"));
    }

    #[test]
    fn array2_data_length_mismatch() {
        let t = f32_tensor(&[2, 3], vec![0.0; 7]);
        let err = t.try_into_array2_f32().unwrap_err().to_string();
        assert!(err.contains("Data length mismatch"));
    }

    #[test]
    fn array_dynamic_ok_various_dims() {
        let t1 = f32_tensor(&[6], vec![0.0; 6]);
        let arr1 = t1.try_into_array_f32().unwrap();
        assert_eq!(arr1.shape(), &[6]);

        let t4 = f32_tensor(&[1, 2, 1, 3], vec![0.0; 6]);
        let arr4 = t4.try_into_array_f32().unwrap();
        assert_eq!(arr4.shape(), &[1, 2, 1, 3]);
    }

    #[test]
    fn array_dynamic_data_length_mismatch() {
        let t = f32_tensor(&[2, 3], vec![0.0; 5]);
        let err = t.try_into_array_f32().unwrap_err().to_string();
        assert!(err.contains("Data length mismatch"));
    }
}
