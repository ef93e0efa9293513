//! Graph metadata reports.
//!
//! A loaded session knows its input and output tensor bindings (names,
//! element types, shapes). These helpers collect that metadata into a
//! printable report, which is how the low-level demo shows what a graph
//! expects before running it.

use ort::session::Session;
use ort::tensor::TensorElementType;
use ort::value::ValueType;

/// Returns a short name for a tensor element type.
pub fn element_type_name(ty: TensorElementType) -> &'static str {
    match ty {
        TensorElementType::Float32 => "f32",
        TensorElementType::Float64 => "f64",
        TensorElementType::Float16 => "f16",
        TensorElementType::Int64 => "i64",
        TensorElementType::Int32 => "i32",
        TensorElementType::Int16 => "i16",
        TensorElementType::Int8 => "i8",
        TensorElementType::Uint64 => "u64",
        TensorElementType::Uint32 => "u32",
        TensorElementType::Uint16 => "u16",
        TensorElementType::Uint8 => "u8",
        TensorElementType::Bool => "bool",
        TensorElementType::String => "string",
        _ => "unknown",
    }
}

/// One named tensor binding of a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorBinding {
    /// Binding name used to address the tensor at run time.
    pub name: String,
    /// Short element type name, e.g. `f32`.
    pub dtype: String,
    /// Dimensions as reported by the graph; negative values are dynamic.
    pub dims: Vec<i64>,
}

impl TensorBinding {
    fn from_value_type(name: &str, value_type: &ValueType) -> Self {
        match value_type {
            ValueType::Tensor { ty, shape, .. } => Self {
                name: name.to_string(),
                dtype: element_type_name(*ty).to_string(),
                dims: shape.iter().copied().collect(),
            },
            _ => Self {
                name: name.to_string(),
                dtype: "non-tensor".to_string(),
                dims: Vec::new(),
            },
        }
    }
}

impl std::fmt::Display for TensorBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} [", self.name, self.dtype)?;
        for (i, dim) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if *dim < 0 {
                write!(f, "?")?;
            } else {
                write!(f, "{}", dim)?;
            }
        }
        write!(f, "]")
    }
}

/// The input and output bindings of a loaded graph.
#[derive(Debug, Clone)]
pub struct ModelReport {
    /// Model name used in diagnostics.
    pub model_name: String,
    /// Input tensor bindings in graph order.
    pub inputs: Vec<TensorBinding>,
    /// Output tensor bindings in graph order.
    pub outputs: Vec<TensorBinding>,
}

impl std::fmt::Display for ModelReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "model: {}", self.model_name)?;
        writeln!(f, "inputs: {}", self.inputs.len())?;
        for (i, binding) in self.inputs.iter().enumerate() {
            writeln!(f, "  #{} {}", i, binding)?;
        }
        writeln!(f, "outputs: {}", self.outputs.len())?;
        for (i, binding) in self.outputs.iter().enumerate() {
            writeln!(f, "  #{} {}", i, binding)?;
        }
        Ok(())
    }
}

/// Collects the tensor bindings of a session into a [`ModelReport`].
pub fn describe_session(session: &Session, model_name: &str) -> ModelReport {
    let inputs = session
        .inputs
        .iter()
        .map(|input| TensorBinding::from_value_type(&input.name, &input.input_type))
        .collect();
    let outputs = session
        .outputs
        .iter()
        .map(|output| TensorBinding::from_value_type(&output.name, &output.output_type))
        .collect();

    ModelReport {
        model_name: model_name.to_string(),
        inputs,
        outputs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_renders_static_dims() {
        let binding = TensorBinding {
            name: "image".to_string(),
            dtype: "f32".to_string(),
            dims: vec![1, 256, 256, 3],
        };
        assert_eq!(binding.to_string(), "image: f32 [1, 256, 256, 3]");
    }

    #[test]
    fn binding_renders_dynamic_dims() {
        let binding = TensorBinding {
            name: "x".to_string(),
            dtype: "f32".to_string(),
            dims: vec![-1, 207],
        };
        assert_eq!(binding.to_string(), "x: f32 [?, 207]");
    }

    #[test]
    fn binding_renders_scalar() {
        let binding = TensorBinding {
            name: "count".to_string(),
            dtype: "i64".to_string(),
            dims: vec![],
        };
        assert_eq!(binding.to_string(), "count: i64 []");
    }

    #[test]
    fn report_lists_all_bindings() {
        let report = ModelReport {
            model_name: "pose".to_string(),
            inputs: vec![TensorBinding {
                name: "image".to_string(),
                dtype: "f32".to_string(),
                dims: vec![1, 256, 256, 3],
            }],
            outputs: vec![TensorBinding {
                name: "keypoints".to_string(),
                dtype: "f32".to_string(),
                dims: vec![1, 14],
            }],
        };
        let rendered = report.to_string();
        assert!(rendered.contains("model: pose"));
        assert!(rendered.contains("#0 image: f32 [1, 256, 256, 3]"));
        assert!(rendered.contains("#0 keypoints: f32 [1, 14]"));
    }

    #[test]
    fn element_type_names() {
        assert_eq!(element_type_name(TensorElementType::Float32), "f32");
        assert_eq!(element_type_name(TensorElementType::Int64), "i64");
    }
}
