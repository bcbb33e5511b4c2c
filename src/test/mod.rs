mod constraints;
mod fat_tree;
