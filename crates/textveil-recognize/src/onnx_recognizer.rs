//! ONNX-based named-entity recognizer.
//!
//! Loads a token-classification model (BERT-style NER exported to ONNX)
//! with its tokenizer and label set, and decodes BIO label sequences into
//! entity spans via the tokenizer's offset map. Requires the `onnx` feature.

#[cfg(feature = "onnx")]
mod inner {
    use std::path::Path;
    use std::sync::Arc;

    use ort::session::Session;
    use ort::value::Tensor;
    use parking_lot::Mutex;
    use tokenizers::Tokenizer;
    use tracing::{info, warn};

    use textveil_core::{Entity, EntityKind, Error, Result};

    use crate::recognizer::RecognizerBackend;

    /// Maximum sequence length for the model.
    const MAX_SEQ_LEN: usize = 512;

    /// ONNX token-classification recognizer.
    pub struct OnnxRecognizer {
        session: Arc<Mutex<Session>>,
        tokenizer: Tokenizer,
        labels: Vec<String>,
    }

    impl OnnxRecognizer {
        /// Load an ONNX model, tokenizer, and label set from the given
        /// directory.
        ///
        /// Expects:
        /// - `model_dir/model.onnx` — the ONNX model file
        /// - `model_dir/tokenizer.json` — the HuggingFace tokenizer
        /// - `model_dir/labels.txt` — one BIO label per line, in index order
        pub fn load(model_dir: &Path) -> std::result::Result<Self, String> {
            let model_path = model_dir.join("model.onnx");
            let tokenizer_path = model_dir.join("tokenizer.json");
            let labels_path = model_dir.join("labels.txt");

            if !model_path.exists() {
                return Err(format!("Model not found: {}", model_path.display()));
            }
            if !tokenizer_path.exists() {
                return Err(format!("Tokenizer not found: {}", tokenizer_path.display()));
            }
            if !labels_path.exists() {
                return Err(format!("Label set not found: {}", labels_path.display()));
            }

            // Initialize ONNX Runtime environment.
            // With load-dynamic feature, ORT_DYLIB_PATH env var must point
            // to libonnxruntime.so
            ort::init().commit();

            let session = Session::builder()
                .map_err(|e| format!("Failed to create session builder: {}", e))?
                .with_intra_threads(2)
                .map_err(|e| format!("Failed to set threads: {}", e))?
                .commit_from_file(&model_path)
                .map_err(|e| format!("Failed to load ONNX model: {}", e))?;

            let tokenizer = Tokenizer::from_file(&tokenizer_path)
                .map_err(|e| format!("Failed to load tokenizer: {}", e))?;

            let labels: Vec<String> = std::fs::read_to_string(&labels_path)
                .map_err(|e| format!("Failed to read label set: {}", e))?
                .lines()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect();
            if labels.is_empty() {
                return Err(format!("Label set is empty: {}", labels_path.display()));
            }

            info!(
                "ONNX recognizer loaded: {} labels, model={}",
                labels.len(),
                model_path.display()
            );

            Ok(Self {
                session: Arc::new(Mutex::new(session)),
                tokenizer,
                labels,
            })
        }

        pub fn label_count(&self) -> usize {
            self.labels.len()
        }

        /// Run inference and decode BIO labels into entity spans.
        fn infer(&self, text: &str) -> Result<Vec<Entity>> {
            let encoding = self
                .tokenizer
                .encode(text, true)
                .map_err(|e| Error::Recognizer(format!("tokenization failed: {}", e)))?;

            let input_ids = encoding.get_ids();
            let attention_mask = encoding.get_attention_mask();
            let offsets = encoding.get_offsets();

            // Truncate to max sequence length
            let seq_len = input_ids.len().min(MAX_SEQ_LEN);
            let input_ids = &input_ids[..seq_len];
            let attention_mask = &attention_mask[..seq_len];
            let offsets = &offsets[..seq_len];

            let ids_data: Vec<i64> = input_ids.iter().map(|&id| id as i64).collect();
            let mask_data: Vec<i64> = attention_mask.iter().map(|&m| m as i64).collect();
            let type_ids_data: Vec<i64> = vec![0i64; seq_len];

            let ids_tensor = Tensor::from_array(([1usize, seq_len], ids_data))
                .map_err(|e| Error::Recognizer(format!("failed to create ids tensor: {}", e)))?;
            let mask_tensor = Tensor::from_array(([1usize, seq_len], mask_data))
                .map_err(|e| Error::Recognizer(format!("failed to create mask tensor: {}", e)))?;
            let type_ids_tensor = Tensor::from_array(([1usize, seq_len], type_ids_data))
                .map_err(|e| {
                    Error::Recognizer(format!("failed to create type_ids tensor: {}", e))
                })?;

            let mut session = self.session.lock();
            let outputs = session
                .run(ort::inputs![ids_tensor, mask_tensor, type_ids_tensor])
                .map_err(|e| Error::Recognizer(format!("inference failed: {}", e)))?;

            // Logits come back as [1, seq_len, num_labels].
            let (shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| Error::Recognizer(format!("failed to extract logits: {}", e)))?;

            let shape_dims: Vec<i64> = shape.iter().copied().collect();
            if shape_dims.len() != 3 {
                return Err(Error::Recognizer(format!(
                    "unexpected output shape: {:?}",
                    shape_dims
                )));
            }
            let num_labels = shape_dims[2] as usize;
            if num_labels != self.labels.len() {
                return Err(Error::Recognizer(format!(
                    "model emits {} labels but labels.txt has {}",
                    num_labels,
                    self.labels.len()
                )));
            }

            Ok(self.decode_bio(text, attention_mask, offsets, data, num_labels, seq_len))
        }

        /// Walk per-token argmax labels and fold B-/I- runs into spans.
        fn decode_bio(
            &self,
            text: &str,
            attention_mask: &[u32],
            offsets: &[(usize, usize)],
            logits: &[f32],
            num_labels: usize,
            seq_len: usize,
        ) -> Vec<Entity> {
            let mut entities = Vec::new();
            let mut current: Option<(EntityKind, usize, usize)> = None;

            for i in 0..seq_len {
                let (tok_start, tok_end) = offsets[i];
                // Special tokens ([CLS], [SEP], padding) carry empty offsets.
                if attention_mask[i] == 0 || tok_start == tok_end {
                    flush(text, &mut current, &mut entities);
                    continue;
                }

                let row = &logits[i * num_labels..(i + 1) * num_labels];
                let best = argmax(row);
                let label = self.labels[best].as_str();

                if label == "O" {
                    flush(text, &mut current, &mut entities);
                    continue;
                }

                let (is_begin, tag) = match label.split_once('-') {
                    Some(("B", tag)) => (true, tag),
                    Some(("I", tag)) => (false, tag),
                    _ => {
                        flush(text, &mut current, &mut entities);
                        continue;
                    }
                };

                let Some(kind) = kind_for_tag(tag) else {
                    // Unsupported category (MISC etc.): filtered here, never
                    // reaches the merger.
                    flush(text, &mut current, &mut entities);
                    continue;
                };

                let extends = !is_begin
                    && matches!(current, Some((cur_kind, _, _)) if cur_kind == kind);
                if extends {
                    if let Some((_, _, end)) = current.as_mut() {
                        *end = tok_end;
                    }
                } else {
                    flush(text, &mut current, &mut entities);
                    current = Some((kind, tok_start, tok_end));
                }
            }
            flush(text, &mut current, &mut entities);

            entities
        }
    }

    /// Close out the in-progress span, validating offsets before emitting.
    fn flush(
        text: &str,
        current: &mut Option<(EntityKind, usize, usize)>,
        entities: &mut Vec<Entity>,
    ) {
        if let Some((kind, start, end)) = current.take() {
            if start < end
                && end <= text.len()
                && text.is_char_boundary(start)
                && text.is_char_boundary(end)
            {
                entities.push(Entity::from_span(text, kind, start, end));
            } else {
                warn!("Discarding misaligned recognizer span {}..{}", start, end);
            }
        }
    }

    fn argmax(row: &[f32]) -> usize {
        let mut best = 0;
        for (i, &v) in row.iter().enumerate() {
            if v > row[best] {
                best = i;
            }
        }
        best
    }

    /// Map a BIO tag to a supported semantic category.
    fn kind_for_tag(tag: &str) -> Option<EntityKind> {
        match tag {
            "PER" | "PERSON" => Some(EntityKind::Person),
            "ORG" => Some(EntityKind::Organization),
            "LOC" | "GPE" => Some(EntityKind::Location),
            _ => None,
        }
    }

    impl RecognizerBackend for OnnxRecognizer {
        fn recognize(&self, text: &str) -> Result<Vec<Entity>> {
            self.infer(text)
        }

        fn is_available(&self) -> bool {
            true
        }

        fn name(&self) -> &'static str {
            "onnx"
        }
    }
}

#[cfg(feature = "onnx")]
pub use inner::OnnxRecognizer;
