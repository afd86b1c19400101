fn main() {
    dotstrap::run_cli();
}
