//! Static table of builtin recipes with their embedded assets.

use super::{CallableSignature, Recipe, RecipeConfig};

const FINETUNE_SIGNATURES: &[CallableSignature] = &[
    CallableSignature {
        name: "setup",
        signature: "setup(cfg: DictConfig) -> None",
    },
    CallableSignature {
        name: "train",
        signature: "train() -> None",
    },
    CallableSignature {
        name: "save_checkpoint",
        signature: "save_checkpoint(epoch: int) -> None",
    },
    CallableSignature {
        name: "cleanup",
        signature: "cleanup() -> None",
    },
    CallableSignature {
        name: "recipe_main",
        signature: "recipe_main(cfg: DictConfig) -> None",
    },
];

const GENERATE_SIGNATURES: &[CallableSignature] = &[
    CallableSignature {
        name: "setup",
        signature: "setup(cfg: DictConfig) -> None",
    },
    CallableSignature {
        name: "generate",
        signature: "generate(cfg: DictConfig) -> None",
    },
    CallableSignature {
        name: "recipe_main",
        signature: "recipe_main(cfg: DictConfig) -> None",
    },
];

pub(super) const RECIPES: &[Recipe] = &[
    Recipe {
        name: "full_finetune_single_device",
        script: include_str!("../../assets/recipes/full_finetune_single_device.py"),
        supports_distributed: false,
        configs: &[
            RecipeConfig {
                name: "llama3_2/1B_full_single_device",
                contents: include_str!("../../assets/configs/llama3_2/1B_full_single_device.yaml"),
            },
            RecipeConfig {
                name: "qwen2_5/0.5B_full_single_device",
                contents: include_str!("../../assets/configs/qwen2_5/0.5B_full_single_device.yaml"),
            },
        ],
        signatures: FINETUNE_SIGNATURES,
    },
    Recipe {
        name: "full_finetune_distributed",
        script: include_str!("../../assets/recipes/full_finetune_distributed.py"),
        supports_distributed: true,
        configs: &[
            RecipeConfig {
                name: "llama3_1/8B_full",
                contents: include_str!("../../assets/configs/llama3_1/8B_full.yaml"),
            },
            RecipeConfig {
                name: "llama3_2/1B_full",
                contents: include_str!("../../assets/configs/llama3_2/1B_full.yaml"),
            },
        ],
        signatures: FINETUNE_SIGNATURES,
    },
    Recipe {
        name: "lora_finetune_single_device",
        script: include_str!("../../assets/recipes/lora_finetune_single_device.py"),
        supports_distributed: false,
        configs: &[
            RecipeConfig {
                name: "llama3_2/1B_lora_single_device",
                contents: include_str!("../../assets/configs/llama3_2/1B_lora_single_device.yaml"),
            },
            RecipeConfig {
                name: "qwen2_5/0.5B_lora_single_device",
                contents: include_str!("../../assets/configs/qwen2_5/0.5B_lora_single_device.yaml"),
            },
        ],
        signatures: FINETUNE_SIGNATURES,
    },
    Recipe {
        name: "lora_finetune_distributed",
        script: include_str!("../../assets/recipes/lora_finetune_distributed.py"),
        supports_distributed: true,
        configs: &[
            RecipeConfig {
                name: "llama3_1/8B_lora",
                contents: include_str!("../../assets/configs/llama3_1/8B_lora.yaml"),
            },
            RecipeConfig {
                name: "llama3_2/1B_lora",
                contents: include_str!("../../assets/configs/llama3_2/1B_lora.yaml"),
            },
        ],
        signatures: FINETUNE_SIGNATURES,
    },
    Recipe {
        name: "generate",
        script: include_str!("../../assets/recipes/generate.py"),
        supports_distributed: false,
        configs: &[RecipeConfig {
            name: "generation",
            contents: include_str!("../../assets/configs/generation.yaml"),
        }],
        signatures: GENERATE_SIGNATURES,
    },
];
